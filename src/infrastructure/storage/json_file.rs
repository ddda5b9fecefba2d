use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::errors::AssessmentResult;
use crate::domain::models::AssessmentRecord;
use crate::domain::ports::AssessmentRepository;

/// Stores each assessment as `<id>.json` in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileAssessmentRepository {
    dir: PathBuf,
}

impl JsonFileAssessmentRepository {
    /// Repository rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

#[async_trait]
impl AssessmentRepository for JsonFileAssessmentRepository {
    async fn save(&self, record: &AssessmentRecord) -> AssessmentResult<()> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(record.id);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, serde_json::to_vec_pretty(record)?).await?;
        fs::rename(&tmp, &path).await?;

        debug!(path = %path.display(), "assessment written");
        Ok(())
    }

    async fn get(&self, id: Uuid) -> AssessmentResult<Option<AssessmentRecord>> {
        match fs::read(self.path_for(id)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn list(&self) -> AssessmentResult<Vec<AssessmentRecord>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut records = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let bytes = fs::read(&path).await?;
            match serde_json::from_slice::<AssessmentRecord>(&bytes) {
                Ok(record) => records.push(record),
                Err(err) => warn!(path = %path.display(), error = %err, "skipping unreadable record"),
            }
        }

        records.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{AnswerEvent, Category, Choice, EliminationConfig};
    use crate::services::suppliers::ScriptedPicks;
    use crate::services::ConvergenceOrchestrator;
    use tempfile::TempDir;

    async fn record(subject: &str) -> AssessmentRecord {
        let orchestrator = ConvergenceOrchestrator::standard(EliminationConfig::default());
        let answers = vec![AnswerEvent::new(Choice::A); 36];
        let mut picks = ScriptedPicks::new([Category::T1; 3]);
        let result = orchestrator.converge(&answers, &mut picks).await.unwrap();
        AssessmentRecord::new(subject, result)
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileAssessmentRepository::new(dir.path().join("results"));
        let record = record("alice").await;

        repo.save(&record).await.unwrap();
        let loaded = repo.get(record.id).await.unwrap().unwrap();
        assert_eq!(loaded, record);
        assert!(dir.path().join("results").join(format!("{}.json", record.id)).exists());
    }

    #[tokio::test]
    async fn test_missing_dir_lists_empty() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileAssessmentRepository::new(dir.path().join("nope"));
        assert!(repo.list().await.unwrap().is_empty());
        assert!(repo.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_skips_foreign_files() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileAssessmentRepository::new(dir.path());
        repo.save(&record("bob").await).await.unwrap();
        repo.save(&record("carol").await).await.unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();

        let records = repo.list().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(repo.list_by_subject("bob").await.unwrap().len(), 1);
    }
}
