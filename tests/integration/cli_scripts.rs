use std::fs;
use tempfile::TempDir;
use treeforge::config::ForgeConfig;
use treeforge::tooling::cli::{CliContext, Commands};
use treeforge::ApiError;

const APP_SCRIPT: &str = "\
# app/{readme, src/{main}}
add folder
rename #1 app
add file
rename #2 readme
move #2 #1
add folder
rename #3 src
move #3 #1
add file
rename #4 main
drag #4
drop #3
check
export
";

#[test]
fn run_script_file_writes_archive() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("workspace");
    let out = temp.path().join("out");
    fs::create_dir_all(&workspace).unwrap();
    let script = workspace.join("app.forge");
    fs::write(&script, APP_SCRIPT).unwrap();

    let mut cli = CliContext::new(workspace, None, Some(out.clone())).unwrap();
    let output = cli.execute(&Commands::Run { script }).unwrap();

    assert!(output.contains("OK: 4 nodes"));
    assert!(output.contains("Forged app.zip (4 entries"));
    let archive = zip::ZipArchive::new(fs::File::open(out.join("app.zip")).unwrap()).unwrap();
    assert_eq!(archive.len(), 4);
}

#[test]
fn workspace_config_raises_threshold() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("treeforge.toml"),
        "[export]\nmin_root_children = 3\n",
    )
    .unwrap();

    let mut cli = CliContext::new(temp.path().to_path_buf(), None, Some(temp.path().to_path_buf()))
        .unwrap();
    assert_eq!(cli.config().export.min_root_children, 3);
    let output = cli.run_script(APP_SCRIPT).unwrap();
    assert!(output.contains("must have at least 3 elements (found 2)"));
    assert!(!temp.path().join("app.zip").exists());
}

#[test]
fn duplicate_rename_is_a_notice() {
    let temp = TempDir::new().unwrap();
    let mut cli = CliContext::with_config(ForgeConfig::default(), Some(temp.path().to_path_buf()));
    let output = cli
        .run_script("add folder\nadd folder\nrename #1 docs\nrename #2 docs\nls\n")
        .unwrap();
    assert!(output.contains("A folder named 'docs' already exists here"));
    assert!(output.contains("new_folder"));
    assert!(output.contains("Total: 2 nodes."));
}

#[test]
fn show_renders_glyphs() {
    let temp = TempDir::new().unwrap();
    let mut cli = CliContext::with_config(ForgeConfig::default(), Some(temp.path().to_path_buf()));
    let output = cli
        .run_script("add folder\nrename #1 app\nadd file\nrename #2 readme\nmove #2 #1\nshow\n")
        .unwrap();
    assert!(output.contains("app/ (#1)"));
    assert!(output.contains(" ├─ readme (#2)"));
}

#[test]
fn trash_and_clear() {
    let temp = TempDir::new().unwrap();
    let mut cli = CliContext::with_config(ForgeConfig::default(), Some(temp.path().to_path_buf()));
    let output = cli
        .run_script("add folder\nadd file\nmove #2 #1\ntrash #1\nadd file\nclear\n")
        .unwrap();
    assert!(output.contains("Deleted #1 (2 nodes)"));
    assert!(output.contains("Cleared canvas (1 node)"));
    assert!(cli.session().tree().is_empty());
}

#[test]
fn second_drag_stops_the_script() {
    let temp = TempDir::new().unwrap();
    let mut cli = CliContext::with_config(ForgeConfig::default(), Some(temp.path().to_path_buf()));
    let err = cli
        .run_script("add file\nadd file\ndrag #1\ndrag #2\n")
        .unwrap_err();
    assert!(matches!(err, ApiError::ScriptError { line: 4, .. }));
    assert!(err.to_string().contains("already in progress"));
}

#[test]
fn missing_script_is_an_io_error() {
    let temp = TempDir::new().unwrap();
    let mut cli = CliContext::with_config(ForgeConfig::default(), None);
    let err = cli
        .execute(&Commands::Run {
            script: temp.path().join("absent.forge"),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Io(_)));
}

#[test]
fn path_like_rename_is_a_notice() {
    let temp = TempDir::new().unwrap();
    let mut cli = CliContext::with_config(ForgeConfig::default(), Some(temp.path().to_path_buf()));
    let output = cli
        .run_script("add file\nrename #1 ../../escape\nrename #1 notes\nls\n")
        .unwrap();
    assert!(output.contains("'../../escape' is not a valid name"));
    assert!(output.contains("Renamed #1 to 'notes'"));
}

#[test]
fn check_accepts_placeholder_beside_same_named_file() {
    let temp = TempDir::new().unwrap();
    let mut cli = CliContext::with_config(ForgeConfig::default(), Some(temp.path().to_path_buf()));
    let output = cli
        .run_script("add folder\nrename #1 root\nadd file\nrename #2 new_folder\nmove #2 #1\nadd folder\nmove #3 #1\ncheck\n")
        .unwrap();
    assert!(output.contains("OK: 3 nodes"));
}
