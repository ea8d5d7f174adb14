#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;

pub fn studentize_cmd() -> Command {
	let mut cmd = Command::cargo_bin("studentize").unwrap_or_else(|e| panic!("{e}"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("STUDENTIZE_LOG");
	cmd
}

pub const LESSON_MARKDOWN: &str = "# Loops\n\nWrite `sum_even`.\n\n## Solution\n\ndef sum_even(values):\n    return sum(v for v in values if v % 2 == 0)\n\n## Next Topic\n\nStrings.\n";

pub const LESSON_NOTEBOOK: &str = r###"{
 "cells": [
  {
   "cell_type": "markdown",
   "metadata": {},
   "source": ["# Loops"]
  },
  {
   "cell_type": "markdown",
   "metadata": {},
   "source": ["## Solutions"]
  },
  {
   "cell_type": "code",
   "execution_count": null,
   "metadata": {},
   "outputs": [],
   "source": ["def sum_even(values):\n", "    return sum(v for v in values if v % 2 == 0)"]
  }
 ],
 "metadata": {},
 "nbformat": 4,
 "nbformat_minor": 5
}"###;

pub fn write_lessons(root: &Path) -> std::io::Result<()> {
	std::fs::write(root.join("tutorial_1.md"), LESSON_MARKDOWN)?;
	std::fs::write(root.join("tutorial_2.ipynb"), LESSON_NOTEBOOK)?;
	std::fs::write(root.join("notes.md"), "## Solution\nnot a lesson\n")?;
	Ok(())
}
