//! Artifact checksum verification against Maven repository sidecar files.

use md5::Md5;
use reqwest::Client;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::download;
use crate::repository::MavenRepository;

/// A checksum algorithm Maven repositories publish sidecar files for, tried
/// strongest-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChecksumKind {
    Sha256,
    Sha1,
    Md5,
}

impl ChecksumKind {
    const ALL: [ChecksumKind; 3] = [ChecksumKind::Sha256, ChecksumKind::Sha1, ChecksumKind::Md5];

    fn extension(self) -> &'static str {
        match self {
            ChecksumKind::Sha256 => "sha256",
            ChecksumKind::Sha1 => "sha1",
            ChecksumKind::Md5 => "md5",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ChecksumKind::Sha256 => "SHA-256",
            ChecksumKind::Sha1 => "SHA-1",
            ChecksumKind::Md5 => "MD5",
        }
    }

    fn digest(self, data: &[u8]) -> String {
        match self {
            ChecksumKind::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(data);
                format!("{:x}", hasher.finalize())
            }
            ChecksumKind::Sha1 => {
                let mut hasher = Sha1::new();
                hasher.update(data);
                format!("{:x}", hasher.finalize())
            }
            ChecksumKind::Md5 => {
                let mut hasher = Md5::new();
                hasher.update(data);
                format!("{:x}", hasher.finalize())
            }
        }
    }
}

/// Verify downloaded artifact bytes against whichever checksum sidecar
/// (`.sha256`, `.sha1`, `.md5`, in that order) the repository publishes for
/// `artifact_url`. `coord` labels the log/error output with the owning
/// Maven coordinate rather than the bare URL.
///
/// Missing sidecars across all three algorithms are not fatal: a mismatched
/// one is.
pub async fn verify(
    client: &Client,
    repo: &MavenRepository,
    coord: &str,
    artifact_url: &str,
    data: &[u8],
) -> miette::Result<()> {
    for kind in ChecksumKind::ALL {
        let sidecar_url = format!("{artifact_url}.{}", kind.extension());
        let Some(sidecar) = download::download_text(client, repo, &sidecar_url).await? else {
            continue;
        };
        let expected = extract_hash(&sidecar);
        let actual = kind.digest(data);
        return check(kind, &actual, &expected, coord);
    }

    tracing::warn!("{coord}: no checksum sidecar published for {artifact_url}");
    Ok(())
}

fn check(kind: ChecksumKind, actual: &str, expected: &str, coord: &str) -> miette::Result<()> {
    if actual.eq_ignore_ascii_case(expected) {
        tracing::debug!("{coord}: {} checksum verified", kind.label());
        Ok(())
    } else {
        Err(basis_util::errors::BasisError::Network {
            message: format!(
                "{coord}: {} mismatch, expected {expected}, got {actual}",
                kind.label()
            ),
        }
        .into())
    }
}

/// Extract the hex hash from a checksum sidecar file.
///
/// Maven checksum files may contain just the hash, or `hash  filename`.
fn extract_hash(content: &str) -> String {
    content.split_whitespace().next().unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_hash_simple() {
        assert_eq!(extract_hash("abc123\n"), "abc123");
    }

    #[test]
    fn extract_hash_with_filename() {
        assert_eq!(extract_hash("abc123  my-lib-1.0.jar\n"), "abc123");
    }

    #[test]
    fn sha256_digest() {
        let digest = ChecksumKind::Sha256.digest(b"hello world");
        assert_eq!(
            digest,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn md5_digest() {
        let digest = ChecksumKind::Md5.digest(b"hello world");
        assert_eq!(digest, "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }

    #[test]
    fn check_accepts_case_insensitive_match() {
        check(ChecksumKind::Sha1, "ABCDEF", "abcdef", "g/a:1.0").unwrap();
    }

    #[test]
    fn check_rejects_a_mismatch() {
        let err = check(ChecksumKind::Sha1, "abc", "def", "g/a:1.0").unwrap_err();
        assert!(err.to_string().contains("g/a:1.0"));
    }
}
