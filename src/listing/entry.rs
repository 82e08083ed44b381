//! Directory entry model and classification.

use std::ffi::OsStr;
use std::fmt;
use std::fs::{FileType, Metadata};
use std::os::unix::fs::{FileTypeExt, MetadataExt};

use super::format::{format_mtime, format_size};

/// Owner-execute permission bit.
const OWNER_EXECUTE: u32 = 0o100;

/// Source language recognised from a regular file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum Language {
    C,
    CHeader,
    Cpp,
    CppHeader,
    Python,
    Java,
    JavaScript,
    Html,
    Css,
    Php,
    Ruby,
    Go,
    Rust,
    Shell,
    Assembly,
    Swift,
    Kotlin,
}

impl Language {
    /// Look up a file name's final extension, ignoring case.
    pub fn from_file_name(name: &OsStr) -> Option<Self> {
        let name = name.to_str()?;
        let (_, ext) = name.rsplit_once('.')?;
        let lang = match ext.to_ascii_lowercase().as_str() {
            "c" => Self::C,
            "h" => Self::CHeader,
            "cpp" | "cc" => Self::Cpp,
            "hpp" => Self::CppHeader,
            "py" => Self::Python,
            "java" => Self::Java,
            "js" => Self::JavaScript,
            "html" => Self::Html,
            "css" => Self::Css,
            "php" => Self::Php,
            "rb" => Self::Ruby,
            "go" => Self::Go,
            "rs" => Self::Rust,
            "sh" => Self::Shell,
            "asm" | "s" => Self::Assembly,
            "swift" => Self::Swift,
            "kt" => Self::Kotlin,
            _ => return None,
        };
        Some(lang)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::C => "C source",
            Self::CHeader => "C header",
            Self::Cpp => "C++ source",
            Self::CppHeader => "C++ header",
            Self::Python => "Python source",
            Self::Java => "Java source",
            Self::JavaScript => "JS source",
            Self::Html => "HTML file",
            Self::Css => "CSS file",
            Self::Php => "PHP source",
            Self::Ruby => "Ruby source",
            Self::Go => "Go source",
            Self::Rust => "Rust source",
            Self::Shell => "Shell script",
            Self::Assembly => "Assembly source",
            Self::Swift => "Swift source",
            Self::Kotlin => "Kotlin source",
        }
    }

    /// Whether a host should open this file in a text editor on activation.
    pub fn is_editable_text(self) -> bool {
        !matches!(self, Self::Html | Self::Css)
    }
}

/// What kind of filesystem object an entry is.
///
/// The label is advisory metadata for display; it is not a security boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum FileKind {
    Regular,
    Source(Language),
    Directory,
    Symlink,
    Fifo,
    Socket,
    BlockDevice,
    CharDevice,
    Unknown,
}

impl FileKind {
    /// Classify from an lstat file type and the entry name.
    pub fn classify(file_type: FileType, name: &OsStr) -> Self {
        if file_type.is_file() {
            Language::from_file_name(name).map_or(Self::Regular, Self::Source)
        } else if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_symlink() {
            Self::Symlink
        } else if file_type.is_fifo() {
            Self::Fifo
        } else if file_type.is_socket() {
            Self::Socket
        } else if file_type.is_block_device() {
            Self::BlockDevice
        } else if file_type.is_char_device() {
            Self::CharDevice
        } else {
            Self::Unknown
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "regular file",
            Self::Source(lang) => lang.label(),
            Self::Directory => "directory",
            Self::Symlink => "symlink",
            Self::Fifo => "FIFO",
            Self::Socket => "socket",
            Self::BlockDevice => "block device",
            Self::CharDevice => "char device",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_regular(self) -> bool {
        matches!(self, Self::Regular | Self::Source(_))
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Copy state of an entry, recomputed on every refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "snake_case"))]
pub enum CopyStatus {
    #[default]
    None,
    InProgress,
    Completed,
}

/// One directory entry as shown by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileEntry {
    /// Entry name, not a path
    pub name: String,
    pub kind: FileKind,
    /// Local modification time, `YYYY-MM-DD HH:MM`
    pub modified_at: String,
    /// Human readable size, `-` for directories
    pub size_label: String,
    /// Raw size in bytes
    pub size: u64,
    /// Raw `st_mode` bits
    pub mode: u32,
    pub is_editable_text: bool,
    /// Derived from the task registry; never authoritative
    pub copy_status: CopyStatus,
}

impl FileEntry {
    /// Build an entry from lstat metadata.
    pub fn from_metadata(name: &OsStr, meta: &Metadata) -> Self {
        let kind = FileKind::classify(meta.file_type(), name);
        let size_label = if kind == FileKind::Directory {
            "-".to_owned()
        } else {
            format_size(meta.len())
        };

        Self {
            name: name.to_string_lossy().into_owned(),
            kind,
            modified_at: format_mtime(meta.mtime()),
            size_label,
            size: meta.len(),
            mode: meta.mode(),
            is_editable_text: matches!(kind, FileKind::Source(lang) if lang.is_editable_text()),
            copy_status: CopyStatus::None,
        }
    }

    /// Regular file with the owner-execute bit set.
    pub fn is_executable(&self) -> bool {
        self.kind.is_regular() && self.mode & OWNER_EXECUTE != 0
    }

    pub fn is_directory(&self) -> bool {
        self.kind == FileKind::Directory
    }

    /// Whether this is the `..` pseudo-entry.
    pub fn is_parent_entry(&self) -> bool {
        self.name == super::PARENT_ENTRY
    }
}
