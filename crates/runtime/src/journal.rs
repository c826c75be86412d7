//! Effect journal - one JSON object per line, appended to a file

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use push_match_core::Effect;

/// One journal line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub seq: u64,
    pub effect: Effect,
}

/// Sender side of a running journal writer
#[derive(Debug, Clone)]
pub struct Journal {
    tx: mpsc::UnboundedSender<JournalRecord>,
}

impl Journal {
    /// Open `path` for appending and start the writer task
    ///
    /// The task ends once every `Journal` clone is dropped and reports how
    /// many records it wrote.
    pub async fn open(path: &str) -> anyhow::Result<(Self, JoinHandle<anyhow::Result<u64>>)> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("opening journal {}", path))?;

        let (tx, mut rx) = mpsc::unbounded_channel::<JournalRecord>();
        let path = path.to_string();
        let task = tokio::spawn(async move {
            let mut buf: Vec<u8> = Vec::with_capacity(256);
            let mut written = 0u64;

            while let Some(record) = rx.recv().await {
                buf.clear();
                serde_json::to_writer(&mut buf, &record).context("encoding journal record")?;
                buf.push(b'\n');
                file.write_all(&buf)
                    .await
                    .with_context(|| format!("writing journal {}", path))?;
                written += 1;
            }

            file.flush().await.context("flushing journal")?;
            Ok(written)
        });

        Ok((Self { tx }, task))
    }

    /// Queue a record; false once the writer has stopped
    pub fn record(&self, seq: u64, effect: Effect) -> bool {
        self.tx.send(JournalRecord { seq, effect }).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use push_match_core::types::{Cell, PieceId};

    #[tokio::test]
    async fn test_journal_writes_json_lines() {
        let path = std::env::temp_dir().join(format!("push-match-journal-{}.jsonl", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        let _ = tokio::fs::remove_file(&path).await;

        let (journal, task) = Journal::open(&path_str).await.unwrap();
        assert!(journal.record(0, Effect::ScoreChanged { total: 100 }));
        assert!(journal.record(
            1,
            Effect::MoveTo {
                piece: PieceId(4),
                cell: Cell::new(2, 3)
            }
        ));
        drop(journal);
        assert_eq!(task.await.unwrap().unwrap(), 2);

        let text = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: JournalRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.effect, Effect::ScoreChanged { total: 100 });
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn test_journal_open_failure_has_context() {
        let err = Journal::open("/nonexistent-dir/for/sure/journal.jsonl")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("opening journal"));
    }
}
