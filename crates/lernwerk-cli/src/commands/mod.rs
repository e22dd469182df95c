pub mod answer;
pub mod init;
pub mod list;
pub mod progress;
pub mod submit;
pub mod validate;

use std::path::PathBuf;

use lernwerk_core::grader::Grader;
use lernwerk_core::lifecycle::TaskController;
use lernwerk_core::store::JsonFileStore;

/// Controller over a JSON task file.
pub fn open(tasks: PathBuf, grader: Grader) -> TaskController<JsonFileStore> {
    TaskController::new(JsonFileStore::new(tasks), grader)
}
