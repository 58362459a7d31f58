//! End-to-end resolution through the plugin manager.

use futures::future::join_all;

use plugin_use_hook_mock::{PLUGIN_ID, UseHookMockOptions};

use crate::helpers::TestProject;

#[tokio::test]
async fn test_hook_import_resolves_to_mock() {
    let project = TestProject::new().await;
    project.touch("src/component.ts");
    project.touch("src/use-theme.ts");
    project.touch("src/use-theme.mock.ts");

    let id = project.resolve("./use-theme", "src/component.ts").await;
    assert_eq!(id, Some(project.id("src/use-theme.mock.ts")));
}

#[tokio::test]
async fn test_missing_mock_falls_back_to_real_module() {
    let project = TestProject::new().await;
    project.touch("src/component.ts");
    project.touch("src/use-theme.ts");

    let id = project.resolve("./use-theme", "src/component.ts").await;
    assert_eq!(id, Some(project.id("src/use-theme.ts")));
}

#[tokio::test]
async fn test_directory_hook_falls_back_to_index() {
    let project = TestProject::new().await;
    project.touch("src/component.ts");
    project.touch("src/use-store/index.ts");

    let id = project.resolve("./use-store", "src/component.ts").await;
    assert_eq!(id, Some(project.id("src/use-store/index.ts")));
}

#[tokio::test]
async fn test_query_suffix_is_kept_on_host_ids_but_not_on_mocks() {
    let project = TestProject::new().await;
    project.touch("src/component.ts");
    project.touch("src/use-theme.mock.ts");
    project.touch("src/theme.css");

    let mock = project.resolve("./use-theme?v=2", "src/component.ts").await;
    assert_eq!(mock, Some(project.id("src/use-theme.mock.ts")));

    let css = project.resolve("./theme.css?inline", "src/component.ts").await;
    assert_eq!(css, Some(format!("{}?inline", project.id("src/theme.css"))));
}

#[tokio::test]
async fn test_mock_only_applies_next_to_the_importer() {
    let project = TestProject::new().await;
    project.touch("src/a/component.ts");
    project.touch("src/b/use-theme.mock.ts");
    project.touch("src/a/use-theme.ts");

    let id = project.resolve("./use-theme", "src/a/component.ts").await;
    assert_eq!(id, Some(project.id("src/a/use-theme.ts")));

    let id = project.resolve("../b/use-theme", "src/a/component.ts").await;
    assert_eq!(id, Some(project.id("src/b/use-theme.mock.ts")));
}

#[tokio::test]
async fn test_disabled_plugin_is_not_installed() {
    let options = UseHookMockOptions {
        enabled: false,
        ..UseHookMockOptions::default()
    };
    let project = TestProject::with_options(options).await;
    project.touch("src/component.ts");
    project.touch("src/use-theme.ts");
    project.touch("src/use-theme.mock.ts");

    assert!(project.manager.list_plugins().await.is_empty());
    let id = project.resolve("./use-theme", "src/component.ts").await;
    assert_eq!(id, Some(project.id("src/use-theme.ts")));
}

#[tokio::test]
async fn test_unload_restores_host_resolution() {
    let project = TestProject::new().await;
    project.touch("src/component.ts");
    project.touch("src/use-theme.ts");
    project.touch("src/use-theme.mock.ts");

    project.manager.unload_plugin(PLUGIN_ID).await.expect("unload");

    let id = project.resolve("./use-theme", "src/component.ts").await;
    assert_eq!(id, Some(project.id("src/use-theme.ts")));
}

#[tokio::test]
async fn test_every_call_reprobes_the_filesystem() {
    let project = TestProject::new().await;
    project.touch("src/component.ts");
    project.touch("src/use-theme.ts");

    let before = project.resolve("./use-theme", "src/component.ts").await;
    assert_eq!(before, Some(project.id("src/use-theme.ts")));

    project.touch("src/use-theme.mock.ts");
    let after = project.resolve("./use-theme", "src/component.ts").await;
    assert_eq!(after, Some(project.id("src/use-theme.mock.ts")));
}

#[tokio::test]
async fn test_concurrent_resolution() {
    let project = TestProject::new().await;
    project.touch("src/component.ts");
    for i in 0..16 {
        if i % 2 == 0 {
            project.touch(&format!("src/use-hook{i}.mock.ts"));
        } else {
            project.touch(&format!("src/use-hook{i}.ts"));
        }
    }

    let specifiers: Vec<String> = (0..16).map(|i| format!("./use-hook{i}")).collect();
    let results = join_all(
        specifiers
            .iter()
            .map(|s| project.resolve(s, "src/component.ts")),
    )
    .await;

    for (i, id) in results.into_iter().enumerate() {
        let expected = if i % 2 == 0 {
            project.id(&format!("src/use-hook{i}.mock.ts"))
        } else {
            project.id(&format!("src/use-hook{i}.ts"))
        };
        assert_eq!(id, Some(expected), "use-hook{i}");
    }
}

#[tokio::test]
async fn test_unresolvable_import_is_not_found() {
    let project = TestProject::new().await;
    project.touch("src/component.ts");

    let importer = project.root().join("src/component.ts");
    let err = project
        .manager
        .resolve("./use-missing", Some(&importer))
        .await
        .expect_err("nothing to resolve");
    assert!(err.is_not_found());
    assert!(err.to_string().contains("use-missing"));
}
