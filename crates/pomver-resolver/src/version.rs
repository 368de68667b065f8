//! The version rule applied to every dependency the moment it is discovered.

use pomver_core::application::Application;
use pomver_core::dependency::Dependency;
use pomver_core::module::ModuleId;
use pomver_core::UNRESOLVED_VERSION;

/// Name inside a `${name}` placeholder, trimmed. `None` if `version` is not a
/// placeholder.
pub fn placeholder_name(version: &str) -> Option<&str> {
    version
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .map(str::trim)
}

/// Look up a property for `module`: declared properties through the parent
/// chain first, then the built-in `project.*` / `pom.*` coordinates of the
/// module itself.
pub fn lookup_property(app: &Application, module: ModuleId, name: &str) -> Option<String> {
    if let Some(value) = app.find_property(module, name) {
        return Some(value.to_string());
    }
    let identity = app.module(module).identity.as_ref()?;
    let value = match name {
        "project.version" | "pom.version" => identity.version(),
        "project.groupId" | "pom.groupId" => identity.group_id(),
        "project.artifactId" | "pom.artifactId" => identity.artifact_id(),
        _ => return None,
    };
    (!value.is_empty()).then(|| value.to_string())
}

/// Settle `dep`'s version as far as the state of `module` allows.
///
/// - `${name}`: replaced with the property value, or set to the unresolved
///   marker if there is none. The group is recorded either way, with an empty
///   version when the property was missing, so later lookups do not guess.
/// - empty: inherited from the nearest recorded version of the same group;
///   stays empty if there is none yet.
/// - anything else: trimmed and recorded as the group's version.
pub fn define_version(app: &mut Application, module: ModuleId, dep: &mut Dependency) {
    let declared = dep.version().trim().to_string();

    if let Some(name) = placeholder_name(&declared) {
        let recorded = match lookup_property(app, module, name) {
            Some(value) if !value.is_empty() => {
                dep.set_version(value.clone());
                value
            }
            _ => {
                tracing::warn!(
                    module = %app.module(module),
                    group = dep.group_id(),
                    artifact = dep.artifact_id(),
                    "couldn't find version for property '{name}'"
                );
                dep.set_version(UNRESOLVED_VERSION);
                String::new()
            }
        };
        app.module_mut(module)
            .group_to_version
            .insert(dep.group_id().to_string(), recorded);
    } else if declared.is_empty() {
        if let Some(inherited) = app.find_group_version(module, dep.group_id()) {
            dep.set_version(inherited.to_string());
        }
    } else {
        dep.set_version(declared.clone());
        app.module_mut(module)
            .group_to_version
            .insert(dep.group_id().to_string(), declared);
    }
}
