use std::path::PathBuf;

use tempfile::TempDir;

/// Test fixture providing an isolated directory for policy files.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {data_path:?}");

        Self {
            temp_dir,
            data_path,
        }
    }

    /// Write a policy file and return its path.
    #[must_use]
    pub fn create_config(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created config: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }
}

impl Drop for UnitTestFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.data_path);
    }
}

/// A policy with defaults, one plain project and one raw regex entry.
pub const SAMPLE_POLICY: &str = r"
.defaults:
  delete:
    unit: days
    count: 30
  runhour: 2
  runminute: 15
  timezone: UTC
app:
  delete:
    unit: days
    count: 7
    size_unit: gigabytes
    quota: 5
'^logs-(dev|qa)\..*$':
  raw_regex: true
  delete:
    unit: months
    count: 1
    size_unit: gigabytes
    quota: 20
";
