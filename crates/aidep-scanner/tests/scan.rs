use aidep_scanner::DependencyScanner;
use tempfile::TempDir;

#[test]
fn test_finds_requirements_txt_first() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("requirements.txt"), "langchain==0.1.0\n").unwrap();
    std::fs::write(tmp.path().join("pyproject.toml"), "[project]\nname = \"x\"\n").unwrap();

    let scanner = DependencyScanner::new(tmp.path());
    let found = scanner.find_requirements_file().unwrap();
    assert_eq!(found.file_name().unwrap(), "requirements.txt");
}

#[test]
fn test_finds_nested_base_requirements() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir(tmp.path().join("requirements")).unwrap();
    std::fs::write(
        tmp.path().join("requirements").join("base.txt"),
        "openai>=1.0.0\n",
    )
    .unwrap();

    let scanner = DependencyScanner::new(tmp.path());
    let deps = scanner.scan_project().unwrap();
    assert_eq!(deps.get("openai").map(String::as_str), Some(">=1.0.0"));
}

#[test]
fn test_scans_pyproject_when_no_requirements() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("pyproject.toml"),
        "[project]\nname = \"demo\"\ndependencies = [\"llama-index==0.7.5\"]\n",
    )
    .unwrap();

    let scanner = DependencyScanner::new(tmp.path());
    let deps = scanner.scan_project().unwrap();
    assert_eq!(deps.get("llama-index").map(String::as_str), Some("==0.7.5"));
}

#[test]
fn test_empty_project_scans_to_nothing() {
    let tmp = TempDir::new().unwrap();
    let scanner = DependencyScanner::new(tmp.path());
    assert!(scanner.find_requirements_file().is_none());
    assert!(scanner.scan_project().unwrap().is_empty());
}

#[test]
fn test_scan_then_filter() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("requirements.txt"),
        "langchain==0.0.200\nllama-index==0.7.5\nrequests>=2.31.0\nflask\n",
    )
    .unwrap();

    let scanner = DependencyScanner::new(tmp.path());
    let deps = scanner.scan_project().unwrap();
    assert_eq!(deps.len(), 4);

    let ai_deps = scanner.filter_ai_frameworks(&deps);
    assert_eq!(ai_deps.len(), 2);
    assert!(ai_deps.contains_key("langchain"));
    assert!(ai_deps.contains_key("llama-index"));
}
