//! 添付ファイルモジュール
//!
//! FAQの添付ファイル名を添付フォルダ（サブフォルダ含む）から探す。
//! 種類の判定は拡張子のみで、表示方法を決めるためにだけ使う。

use crate::error::{FaqSearchError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt"];

/// 添付ファイルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Document,
    Link,
}

impl AttachmentKind {
    pub fn classify(file_name: &str) -> Self {
        let ext = Path::new(file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            AttachmentKind::Image
        } else if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
            AttachmentKind::Document
        } else {
            AttachmentKind::Link
        }
    }
}

impl std::fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachmentKind::Image => write!(f, "画像"),
            AttachmentKind::Document => write!(f, "資料"),
            AttachmentKind::Link => write!(f, "リンク"),
        }
    }
}

/// 添付フォルダからファイルを探す
#[derive(Debug, Clone)]
pub struct AttachmentResolver {
    root: PathBuf,
}

impl AttachmentResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// ファイル名に一致する最初のファイルのパス
    pub fn locate(&self, file_name: &str) -> Option<PathBuf> {
        let name = Path::new(file_name).file_name()?;
        if !self.root.is_dir() {
            return None;
        }

        WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .find(|e| e.file_type().is_file() && e.file_name() == name)
            .map(|e| e.into_path())
    }

    /// ファイル内容を読み込む
    pub fn open(&self, file_name: &str) -> Result<Attachment> {
        let path = self
            .locate(file_name)
            .ok_or_else(|| FaqSearchError::FileNotFound(file_name.to_string()))?;
        let bytes = std::fs::read(&path)?;
        Ok(Attachment {
            kind: AttachmentKind::classify(file_name),
            path,
            bytes,
        })
    }
}

/// 読み込んだ添付ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_classify() {
        assert_eq!(AttachmentKind::classify("記入例.PNG"), AttachmentKind::Image);
        assert_eq!(AttachmentKind::classify("様式1.pdf"), AttachmentKind::Document);
        assert_eq!(AttachmentKind::classify("https://example.com/a"), AttachmentKind::Link);
        assert_eq!(AttachmentKind::classify("README"), AttachmentKind::Link);
    }

    #[test]
    fn test_locate_in_subfolder() {
        let dir = tempdir().expect("Failed to create temp dir");
        let sub = dir.path().join("様式");
        std::fs::create_dir_all(&sub).unwrap();
        std::fs::write(sub.join("様式1.pdf"), b"%PDF-1.4").unwrap();

        let resolver = AttachmentResolver::new(dir.path());
        assert_eq!(resolver.locate("様式1.pdf"), Some(sub.join("様式1.pdf")));
        let attachment = resolver.open("様式1.pdf").unwrap();
        assert_eq!(attachment.kind, AttachmentKind::Document);
        assert_eq!(attachment.path, sub.join("様式1.pdf"));
        assert_eq!(attachment.bytes, b"%PDF-1.4");
    }

    #[test]
    fn test_not_found() {
        let dir = tempdir().expect("Failed to create temp dir");
        let resolver = AttachmentResolver::new(dir.path());
        assert!(resolver.locate("なし.pdf").is_none());
        assert!(matches!(resolver.open("なし.pdf"), Err(FaqSearchError::FileNotFound(_))));

        let missing = AttachmentResolver::new(dir.path().join("missing"));
        assert!(missing.locate("なし.pdf").is_none());
    }
}
