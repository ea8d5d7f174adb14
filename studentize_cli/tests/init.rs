mod common;

use studentize_core::AnyEmptyResult;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let mut cmd = common::studentize_cmd();
	cmd.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created config file"));

	let config_path = tmp.path().join("studentize.toml");
	let content = std::fs::read_to_string(&config_path)?;
	assert!(content.contains("[discovery]"));
	assert!(content.contains("exercise_functions"));

	// The sample only contains comments, so it loads as the defaults.
	let config = studentize_core::StudentizeConfig::load_or_default(tmp.path())?;
	assert_eq!(config.discovery.suffix, "_student");

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let config_path = tmp.path().join("studentize.toml");
	std::fs::write(&config_path, "existing config")?;

	let mut cmd = common::studentize_cmd();
	cmd.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(std::fs::read_to_string(&config_path)?, "existing config");

	Ok(())
}

#[test]
fn init_respects_hidden_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join(".studentize.toml"), "")?;

	let mut cmd = common::studentize_cmd();
	cmd.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(".studentize.toml"));

	assert!(!tmp.path().join("studentize.toml").exists());

	Ok(())
}
