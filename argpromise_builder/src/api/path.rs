use std::path::Path;
use std::rc::Rc;

use crate::api::field::{OptionalPromise, Promise};
use crate::parser::Parser;

/// The kind of an existing filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// A file (or anything else which is not a directory).
    File,
    /// A directory.
    Directory,
}

/// Behaviour to look up a path on the filesystem.
///
/// This is the only filesystem access of the parser, used by the `existing_*` registrations.
/// Inject an alternative via [`Parser::with_path_inspector`].
pub trait PathInspector {
    /// The kind of entry at `path`, or `None` if nothing exists there.
    fn inspect(&self, path: &Path) -> Option<PathKind>;
}

/// The [`PathInspector`] backed by [`std::fs::metadata`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl PathInspector for LocalFileSystem {
    fn inspect(&self, path: &Path) -> Option<PathKind> {
        std::fs::metadata(path).ok().map(|metadata| {
            if metadata.is_dir() {
                PathKind::Directory
            } else {
                PathKind::File
            }
        })
    }
}

fn require(
    inspector: Rc<dyn PathInspector>,
    expected: PathKind,
) -> impl Fn(&String) -> Result<(), String> + 'static {
    move |value| match (inspector.inspect(Path::new(value)), expected) {
        (None, PathKind::File) => Err("the file doesn't exist".to_string()),
        (None, PathKind::Directory) => Err("the directory doesn't exist".to_string()),
        (Some(PathKind::Directory), PathKind::File) => {
            Err("that is a directory not a file".to_string())
        }
        (Some(PathKind::File), PathKind::Directory) => {
            Err("that is a file not a directory".to_string())
        }
        (Some(_), _) => Ok(()),
    }
}

impl<'a> Parser<'a> {
    /// Declare a required positional naming an existing file.
    ///
    /// ### Example
    /// ```
    /// # use argpromise_builder as argpromise;
    /// use argpromise::Parser;
    ///
    /// let mut parser = Parser::new(&["program", "/definitely/not/here"]);
    /// let _ = parser.existing_file("input");
    ///
    /// let error = parser.parse().unwrap_err();
    /// assert_eq!(
    ///     error.to_string(),
    ///     "Failed to parse input: the file doesn't exist\nUsage: program <input>\n"
    /// );
    /// ```
    pub fn existing_file(&mut self, name: impl Into<String>) -> Promise<String> {
        let validator = require(self.path_inspector(), PathKind::File);
        self.string(name).validate(validator)
    }

    /// Declare an optional positional naming an existing file.
    pub fn optional_existing_file(&mut self, name: impl Into<String>) -> OptionalPromise<String> {
        let validator = require(self.path_inspector(), PathKind::File);
        self.optional_string(name).validate(validator)
    }

    /// Declare a required positional naming an existing directory.
    pub fn existing_directory(&mut self, name: impl Into<String>) -> Promise<String> {
        let validator = require(self.path_inspector(), PathKind::Directory);
        self.string(name).validate(validator)
    }

    /// Declare an optional positional naming an existing directory.
    pub fn optional_existing_directory(
        &mut self,
        name: impl Into<String>,
    ) -> OptionalPromise<String> {
        let validator = require(self.path_inspector(), PathKind::Directory);
        self.optional_string(name).validate(validator)
    }
}
