use std::path::Path;

use pomver_core::application::Application;
use pomver_core::dependency::Dependency;
use pomver_core::module::{Module, ModuleId};
use pomver_core::UNRESOLVED_VERSION;
use pomver_maven::pom::PomDocument;
use pomver_resolver::resolver::{parent_descriptor_path, resolve_application, resolve_documents};
use tempfile::TempDir;

fn pom(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
{body}
</project>"#
    )
}

/// Build an application from `(descriptor path, xml)` pairs, in order.
fn app_from(descriptors: &[(&str, String)]) -> (Application, Vec<Option<PomDocument>>) {
    let mut app = Application::new("app", "/repo/app");
    let mut docs = Vec::new();
    for (path, xml) in descriptors {
        let dir = pomver_util::fs::parent_dir_name(Path::new(path));
        app.add_module(Module::new(dir, *path));
        docs.push(Some(PomDocument::parse(xml).unwrap()));
    }
    (app, docs)
}

fn version_of<'a>(app: &'a Application, module: usize, artifact: &str) -> &'a str {
    app.modules()[module]
        .dependencies
        .iter()
        .find(|d| d.artifact_id() == artifact)
        .unwrap_or_else(|| panic!("no dependency {artifact}"))
        .version()
}

fn id(app: &Application, index: usize) -> ModuleId {
    app.module_ids().nth(index).unwrap()
}

#[test]
fn placeholder_resolves_from_local_property() {
    let (mut app, docs) = app_from(&[(
        "/repo/app/pom.xml",
        pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>1.0</version>
    <properties><foo.version>1.2.3</foo.version></properties>
    <dependencies>
        <dependency><groupId>com.foo</groupId><artifactId>foo</artifactId><version>${foo.version}</version></dependency>
    </dependencies>"#),
    )]);
    resolve_documents(&mut app, docs);
    assert_eq!(version_of(&app, 0, "foo"), "1.2.3");
}

#[test]
fn placeholder_resolves_through_three_level_chain() {
    let (mut app, docs) = app_from(&[
        (
            "/repo/app/pom.xml",
            pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>1.0</version>
    <properties><foo.version>1.2.3</foo.version></properties>"#),
        ),
        (
            "/repo/app/mid/pom.xml",
            pom(r#"
    <parent>
        <groupId>org.shop</groupId><artifactId>shop</artifactId><version>1.0</version>
        <relativePath>../pom.xml</relativePath>
    </parent>
    <artifactId>mid</artifactId>"#),
        ),
        (
            "/repo/app/mid/leaf/pom.xml",
            pom(r#"
    <parent>
        <groupId>org.shop</groupId><artifactId>mid</artifactId><version>1.0</version>
        <relativePath>..</relativePath>
    </parent>
    <artifactId>leaf</artifactId>
    <dependencies>
        <dependency><groupId>com.foo</groupId><artifactId>foo</artifactId><version>${foo.version}</version></dependency>
    </dependencies>"#),
        ),
    ]);
    resolve_documents(&mut app, docs);

    assert_eq!(app.modules()[1].parent, Some(id(&app, 0)));
    assert_eq!(app.modules()[2].parent, Some(id(&app, 1)));
    assert_eq!(app.modules()[0].children, vec![id(&app, 1)]);
    assert_eq!(version_of(&app, 2, "foo"), "1.2.3");

    // Parents linked by path are not reported as dependencies.
    assert_eq!(app.modules()[2].dependencies.len(), 1);
}

#[test]
fn identity_inherits_group_and_version_from_parent_tag() {
    let (mut app, docs) = app_from(&[
        (
            "/repo/app/pom.xml",
            pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>3.1.0</version>
    <name>Shop</name>"#),
        ),
        (
            "/repo/app/core/pom.xml",
            pom(r#"
    <parent><groupId>org.shop</groupId><artifactId>shop</artifactId><version>3.1.0</version></parent>
    <artifactId>core</artifactId>"#),
        ),
    ]);
    resolve_documents(&mut app, docs);

    let core = &app.modules()[1];
    assert_eq!(core.identity, Some(Dependency::new("org.shop", "core", "3.1.0")));
    assert_eq!(core.name, None);
    assert_eq!(app.modules()[0].name.as_deref(), Some("Shop"));
}

#[test]
fn parent_by_coordinates_is_reported_and_linked() {
    let (mut app, docs) = app_from(&[
        (
            "/repo/app/pom.xml",
            pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>2.0</version>"#),
        ),
        (
            "/repo/app/api/pom.xml",
            pom(r#"
    <parent><groupId>org.shop</groupId><artifactId>shop</artifactId><version>2.0</version></parent>
    <artifactId>api</artifactId>"#),
        ),
    ]);
    resolve_documents(&mut app, docs);

    assert_eq!(app.modules()[1].parent, Some(id(&app, 0)));
    assert_eq!(
        app.modules()[1].dependencies,
        vec![Dependency::new("org.shop", "shop", "2.0")]
    );
}

#[test]
fn forward_declared_parent_is_linked_before_pass_two() {
    let (mut app, docs) = app_from(&[
        (
            "/repo/app/child/pom.xml",
            pom(r#"
    <parent><groupId>com.acme</groupId><artifactId>acme-parent</artifactId><version>1.0</version></parent>
    <artifactId>child</artifactId>
    <dependencies>
        <dependency><groupId>org.junit</groupId><artifactId>junit</artifactId></dependency>
    </dependencies>"#),
        ),
        (
            "/repo/app/pom.xml",
            pom(r#"
    <groupId>com.acme</groupId>
    <artifactId>acme-parent</artifactId>
    <version>1.0</version>
    <dependencyManagement>
        <dependencies>
            <dependency><groupId>org.junit</groupId><artifactId>junit</artifactId><version>4.13.2</version></dependency>
        </dependencies>
    </dependencyManagement>"#),
        ),
    ]);
    let report = resolve_documents(&mut app, docs);

    assert_eq!(app.modules()[0].parent, Some(id(&app, 1)));
    assert_eq!(app.modules()[1].children, vec![id(&app, 0)]);
    assert_eq!(version_of(&app, 0, "junit"), "4.13.2");
    assert_eq!(report.borrowed, 0);
    assert_eq!(report.unresolved, 0);
}

#[test]
fn parent_sharing_the_child_artifact_id_is_linked() {
    let (mut app, docs) = app_from(&[
        (
            "/repo/app/lib/pom.xml",
            pom(r#"
    <parent><groupId>com.acme</groupId><artifactId>commons</artifactId><version>1.0</version></parent>
    <groupId>com.acme.lib</groupId>
    <artifactId>commons</artifactId>
    <dependencies>
        <dependency><groupId>org.junit</groupId><artifactId>junit</artifactId><version>${junit.version}</version></dependency>
    </dependencies>"#),
        ),
        (
            "/repo/app/pom.xml",
            pom(r#"
    <groupId>com.acme</groupId>
    <artifactId>commons</artifactId>
    <version>1.0</version>
    <properties><junit.version>4.13.2</junit.version></properties>"#),
        ),
    ]);
    resolve_documents(&mut app, docs.clone());
    assert_eq!(app.modules()[0].parent, Some(id(&app, 1)));
    assert_eq!(app.modules()[1].parent, None);

    // A second run starts from cleared identities and must link the same way.
    resolve_documents(&mut app, docs);
    assert_eq!(app.modules()[0].parent, Some(id(&app, 1)));
    assert_eq!(app.modules()[1].children, vec![id(&app, 0)]);
}

#[test]
fn missing_relative_parent_leaves_link_absent() {
    let (mut app, docs) = app_from(&[(
        "/repo/app/core/pom.xml",
        pom(r#"
    <parent>
        <groupId>org.shop</groupId><artifactId>shop</artifactId><version>1.0</version>
        <relativePath>../../elsewhere/pom.xml</relativePath>
    </parent>
    <artifactId>core</artifactId>"#),
    )]);
    resolve_documents(&mut app, docs);
    assert_eq!(app.modules()[0].parent, None);
    assert!(app.modules()[0].dependencies.is_empty());
}

#[test]
fn empty_version_inherits_group_recorded_earlier_in_module() {
    let (mut app, docs) = app_from(&[(
        "/repo/app/pom.xml",
        pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>1.0</version>
    <dependencyManagement>
        <dependencies>
            <dependency><groupId>org.x</groupId><artifactId>x-bom</artifactId><version>2.0.0</version></dependency>
        </dependencies>
    </dependencyManagement>
    <dependencies>
        <dependency><groupId>org.x</groupId><artifactId>x-core</artifactId><version></version></dependency>
    </dependencies>"#),
    )]);
    resolve_documents(&mut app, docs);
    assert_eq!(version_of(&app, 0, "x-core"), "2.0.0");
}

#[test]
fn empty_version_declared_before_its_group_resolves_in_pass_two() {
    let (mut app, docs) = app_from(&[(
        "/repo/app/pom.xml",
        pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>1.0</version>
    <dependencies>
        <dependency><groupId>org.x</groupId><artifactId>x-core</artifactId></dependency>
        <dependency><groupId>org.x</groupId><artifactId>x-extra</artifactId><version>2.0.0</version></dependency>
    </dependencies>"#),
    )]);
    let report = resolve_documents(&mut app, docs);
    assert_eq!(version_of(&app, 0, "x-core"), "2.0.0");
    assert_eq!(report.borrowed, 0);
}

#[test]
fn similar_group_version_is_borrowed() {
    let (mut app, docs) = app_from(&[(
        "/repo/app/pom.xml",
        pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>1.0</version>
    <dependencies>
        <dependency><groupId>com.acme.util</groupId><artifactId>util</artifactId><version>5.0.0</version></dependency>
        <dependency><groupId>com.acme.core</groupId><artifactId>core</artifactId></dependency>
    </dependencies>"#),
    )]);
    let report = resolve_documents(&mut app, docs);
    assert_eq!(version_of(&app, 0, "core"), "5.0.0");
    assert_eq!(report.borrowed, 1);
}

#[test]
fn unrelated_group_is_not_borrowed() {
    let (mut app, docs) = app_from(&[(
        "/repo/app/pom.xml",
        pom(r#"
    <groupId>net.shop</groupId>
    <artifactId>shop</artifactId>
    <version>1.0</version>
    <dependencies>
        <dependency><groupId>org.other.lib</groupId><artifactId>lib</artifactId><version>1.0</version></dependency>
        <dependency><groupId>com.acme.core</groupId><artifactId>core</artifactId></dependency>
    </dependencies>"#),
    )]);
    let report = resolve_documents(&mut app, docs);
    assert_eq!(version_of(&app, 0, "core"), UNRESOLVED_VERSION);
    assert_eq!(report.unresolved, 1);
    assert_eq!(report.borrowed, 0);
}

#[test]
fn unresolved_placeholder_is_not_guessed_for_its_group() {
    let (mut app, docs) = app_from(&[(
        "/repo/app/pom.xml",
        pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>1.0</version>
    <dependencies>
        <dependency><groupId>com.foo</groupId><artifactId>a</artifactId><version>${missing.version}</version></dependency>
        <dependency><groupId>com.foo</groupId><artifactId>b</artifactId></dependency>
        <dependency><groupId>com.foo.extra</groupId><artifactId>c</artifactId><version>9.9</version></dependency>
    </dependencies>"#),
    )]);
    let report = resolve_documents(&mut app, docs);
    assert_eq!(version_of(&app, 0, "a"), UNRESOLVED_VERSION);
    assert_eq!(version_of(&app, 0, "b"), UNRESOLVED_VERSION);
    assert_eq!(report.unresolved, 2);
}

#[test]
fn java_version_becomes_a_pseudo_dependency() {
    let (mut app, docs) = app_from(&[(
        "/repo/app/pom.xml",
        pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>1.0</version>
    <properties><java.version>17</java.version></properties>"#),
    )]);
    resolve_documents(&mut app, docs);
    assert_eq!(
        app.modules()[0].dependencies,
        vec![Dependency::new("", "Java", "17")]
    );
    assert_eq!(
        app.modules()[0].properties.get("java.version").map(String::as_str),
        Some("17")
    );
}

#[test]
fn dependencies_are_sorted_by_group_then_artifact() {
    let (mut app, docs) = app_from(&[(
        "/repo/app/pom.xml",
        pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>1.0</version>
    <properties><java.version>21</java.version></properties>
    <dependencies>
        <dependency><groupId>org.z</groupId><artifactId>b</artifactId><version>1</version></dependency>
        <dependency><groupId>org.a</groupId><artifactId>y</artifactId><version>1</version></dependency>
        <dependency><groupId>org.a</groupId><artifactId>x</artifactId><version>1</version></dependency>
    </dependencies>"#),
    )]);
    resolve_documents(&mut app, docs);
    let keys: Vec<String> = app.modules()[0]
        .dependencies
        .iter()
        .map(|d| d.key().to_string())
        .collect();
    assert_eq!(keys, vec![":Java", "org.a:x", "org.a:y", "org.z:b"]);
}

#[test]
fn every_dependency_ends_with_a_version() {
    let (mut app, docs) = app_from(&[
        (
            "/repo/app/pom.xml",
            pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>1.0</version>
    <dependencies>
        <dependency><groupId>org.shop.a</groupId><artifactId>a</artifactId><version>1.1</version></dependency>
    </dependencies>"#),
        ),
        (
            "/repo/app/core/pom.xml",
            pom(r#"
    <parent><groupId>org.shop</groupId><artifactId>shop</artifactId><version>1.0</version></parent>
    <artifactId>core</artifactId>
    <dependencies>
        <dependency><groupId>org.shop.b</groupId><artifactId>b</artifactId></dependency>
        <dependency><groupId>io.unknown</groupId><artifactId>c</artifactId></dependency>
        <dependency><groupId>io.unknown</groupId><artifactId>d</artifactId><version>${nope}</version></dependency>
    </dependencies>"#),
        ),
    ]);
    resolve_documents(&mut app, docs);
    for module in app.modules() {
        for dep in &module.dependencies {
            assert!(!dep.is_pending(), "{dep} in {module} has no version");
        }
    }
    // The module's own record of its parent group beats the parent's equally
    // similar org.shop.a.
    assert_eq!(version_of(&app, 1, "b"), "1.0");
    assert_eq!(version_of(&app, 1, "c"), UNRESOLVED_VERSION);
}

#[test]
fn resolving_twice_gives_identical_results() {
    let descriptors = [
        (
            "/repo/app/pom.xml",
            pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>1.0</version>
    <properties><lib.version>4.0</lib.version></properties>
    <dependencies>
        <dependency><groupId>com.lib</groupId><artifactId>lib</artifactId><version>${lib.version}</version></dependency>
    </dependencies>"#),
        ),
        (
            "/repo/app/core/pom.xml",
            pom(r#"
    <parent><groupId>org.shop</groupId><artifactId>shop</artifactId><version>1.0</version></parent>
    <artifactId>core</artifactId>
    <dependencies>
        <dependency><groupId>com.lib</groupId><artifactId>lib-extra</artifactId></dependency>
        <dependency><groupId>com.lib.sub</groupId><artifactId>sub</artifactId></dependency>
    </dependencies>"#),
        ),
    ];
    let (mut app, docs) = app_from(&descriptors);
    let first_report = resolve_documents(&mut app, docs.clone());
    let first: Vec<Module> = app.modules().to_vec();

    let second_report = resolve_documents(&mut app, docs);
    assert_eq!(first_report, second_report);
    for (a, b) in first.iter().zip(app.modules()) {
        assert_eq!(a.dependencies, b.dependencies);
        assert_eq!(a.group_to_version, b.group_to_version);
        assert_eq!(a.parent, b.parent);
        assert_eq!(a.children, b.children);
    }
    assert_eq!(version_of(&app, 1, "lib-extra"), "4.0");
    assert_eq!(version_of(&app, 1, "sub"), "4.0");
}

#[test]
fn unparsed_descriptor_keeps_module_without_identity() {
    let mut app = Application::new("app", "/repo/app");
    app.add_module(Module::new("app", "/repo/app/pom.xml"));
    let report = resolve_documents(&mut app, vec![None]);
    assert_eq!(report.unparsed, 1);
    assert_eq!(report.modules, 1);
    assert!(app.modules()[0].identity.is_none());
}

#[test]
fn modules_without_a_document_count_as_unparsed() {
    let (mut app, mut docs) = app_from(&[
        (
            "/repo/app/pom.xml",
            pom("<groupId>org.shop</groupId><artifactId>shop</artifactId><version>1.0</version>"),
        ),
        (
            "/repo/app/core/pom.xml",
            pom("<groupId>org.shop</groupId><artifactId>core</artifactId><version>1.0</version>"),
        ),
    ]);
    docs.truncate(1);
    let report = resolve_documents(&mut app, docs);
    assert_eq!(report.modules, 2);
    assert_eq!(report.unparsed, 1);
    assert!(app.modules()[0].identity.is_some());
    assert!(app.modules()[1].identity.is_none());
}

#[test]
fn resolve_application_reads_descriptors_from_disk() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("shop");
    std::fs::create_dir_all(root.join("core")).unwrap();
    std::fs::write(
        root.join("pom.xml"),
        pom(r#"
    <groupId>org.shop</groupId>
    <artifactId>shop</artifactId>
    <version>1.0</version>
    <properties><guava.version>33.0.0-jre</guava.version></properties>"#),
    )
    .unwrap();
    std::fs::write(
        root.join("core").join("pom.xml"),
        pom(r#"
    <parent>
        <groupId>org.shop</groupId><artifactId>shop</artifactId><version>1.0</version>
        <relativePath>../pom.xml</relativePath>
    </parent>
    <artifactId>core</artifactId>
    <dependencies>
        <dependency><groupId>com.google.guava</groupId><artifactId>guava</artifactId><version>${guava.version}</version></dependency>
    </dependencies>"#),
    )
    .unwrap();
    std::fs::write(root.join("core").join("broken.xml"), "<project>").unwrap();

    let mut app = Application::new("shop", &root);
    app.add_module(Module::new("shop", root.join("pom.xml")));
    app.add_module(Module::new("core", root.join("core").join("pom.xml")));
    app.add_module(Module::new("core", root.join("core").join("broken.xml")));

    let report = resolve_application(&mut app);
    assert_eq!(report.unparsed, 1);
    assert_eq!(version_of(&app, 1, "guava"), "33.0.0-jre");
    assert!(app.modules()[2].identity.is_none());
}

#[test]
fn parent_descriptor_path_handles_files_and_directories() {
    let descriptor = Path::new("/repo/app/core/pom.xml");
    assert_eq!(
        parent_descriptor_path(descriptor, "../pom.xml"),
        Path::new("/repo/app/pom.xml")
    );
    assert_eq!(
        parent_descriptor_path(descriptor, ".."),
        Path::new("/repo/app/pom.xml")
    );
    assert_eq!(
        parent_descriptor_path(descriptor, "../parent/"),
        Path::new("/repo/app/parent/pom.xml")
    );
    assert_eq!(
        parent_descriptor_path(descriptor, "../bom/custom.XML"),
        Path::new("/repo/app/bom/custom.XML")
    );
}
