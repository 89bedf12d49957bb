use crate::commands::Command;
use anyhow::{bail, Context, Result};
use futures::StreamExt;
use memory_card::{AsyncMap, Card, Options};
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs::create_dir_all;
use tracing::debug;

pub struct Runner {
    card: Card,
    debug: bool,
}

impl Runner {
    /// Opens the card `name` in `dir` (default: `<config dir>/memory-card`) and loads it.
    pub async fn new(name: String, dir: Option<PathBuf>, debug: bool) -> Result<Self> {
        let dir = match dir {
            Some(dir) => dir,
            None => dirs::config_dir()
                .with_context(|| format!("No config dir: {:?}", dirs::config_dir()))?
                .join("memory-card"),
        };
        create_dir_all(&dir).await.with_context(|| format!("Cannot create {dir:?}"))?;
        let options = Options { base_dir: Some(dir), ..Default::default() };
        let card = Card::with_options(name, &options)?;
        card.load().await.with_context(|| format!("Cannot load {card}"))?;
        debug!("opened {card}");
        Ok(Self { card, debug })
    }
    pub fn card(&self) -> &Card {
        &self.card
    }
    pub async fn run(&self, command: Command) -> Result<()> {
        let is_mutation = command.is_mutation();
        match command {
            Command::Get(args) => match self.card.get(&args.slot).await {
                Some(value) => self.print(&value)?,
                None => bail!("No such slot: {:?}", args.slot),
            },
            Command::Set(args) => self.card.set(args.slot, args.value).await,
            Command::Has(args) => self.print(&self.card.has(&args.slot).await)?,
            Command::Delete(args) => self.card.delete(&args.slot).await,
            Command::Keys => {
                self.print(&self.card.keys().collect::<Vec<_>>().await)?;
            }
            Command::Values => {
                self.print(&self.card.values().collect::<Vec<_>>().await)?;
            }
            Command::Entries => {
                self.print(&self.card.entries().collect::<Vec<_>>().await)?;
            }
            Command::Size => self.print(&self.card.size().await)?,
            Command::Clear => self.card.clear().await,
            Command::Dump => self.print(&self.card.snapshot().await)?,
            Command::Destroy => {
                let before = self.card.path().await;
                self.card.destroy().await?;
                if let (Some(path), None) = (before, self.card.path().await) {
                    println!("Destroyed {}, removed {path:?}", self.card);
                }
            }
            Command::Path => self.print(&self.card.path().await)?,
            Command::Version => println!("{}", self.card.version()),
        }
        if is_mutation {
            self.card.save().await.with_context(|| format!("Cannot save {}", self.card))?;
        }
        Ok(())
    }
    fn print<T: std::fmt::Debug + Serialize>(&self, result: &T) -> Result<()> {
        if self.debug {
            println!("{:#?}", result);
        } else {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{SetArgs, SlotArgs};
    use memory_card::Value;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_mutations_are_saved() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let runner = Runner::new(String::from("cli"), Some(dir.path().to_path_buf()), false)
            .await
            .expect("failed to create runner");
        runner
            .run(Command::Set(SetArgs { slot: String::from("k"), value: json!([1, 2]) }))
            .await
            .expect("failed to set");
        runner.run(Command::Keys).await.expect("failed to list keys");
        assert!(dir.path().join("cli.memory-card.json").exists());

        let reopened = Runner::new(String::from("cli"), Some(dir.path().to_path_buf()), true)
            .await
            .expect("failed to create runner");
        assert_eq!(reopened.card().get(&String::from("k")).await, Some(json!([1, 2])));

        reopened
            .run(Command::Delete(SlotArgs { slot: String::from("k") }))
            .await
            .expect("failed to delete");
        reopened.run(Command::Destroy).await.expect("failed to destroy");
        assert!(!dir.path().join("cli.memory-card.json").exists());
        assert_eq!(reopened.card().path().await, None);
    }

    #[tokio::test]
    async fn test_get_missing_slot() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let runner = Runner::new(String::from("get"), Some(dir.path().to_path_buf()), false)
            .await
            .expect("failed to create runner");
        runner
            .run(Command::Set(SetArgs { slot: String::from("null"), value: Value::Null }))
            .await
            .expect("failed to set");
        runner
            .run(Command::Get(SlotArgs { slot: String::from("null") }))
            .await
            .expect("stored null should be printed");
        assert!(runner.run(Command::Get(SlotArgs { slot: String::from("missing") })).await.is_err());
    }

    #[tokio::test]
    async fn test_destroy_without_file() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let runner = Runner::new(String::from("unsaved"), Some(dir.path().to_path_buf()), false)
            .await
            .expect("failed to create runner");
        runner.run(Command::Destroy).await.expect("failed to destroy");
        assert_eq!(
            runner.card().path().await,
            Some(dir.path().join("unsaved.memory-card.json"))
        );
    }

    #[tokio::test]
    async fn test_creates_missing_dir() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let nested = dir.path().join("a").join("b");
        let runner = Runner::new(String::from("nested"), Some(nested.clone()), false)
            .await
            .expect("failed to create runner");
        runner.run(Command::Clear).await.expect("failed to clear");
        assert!(nested.join("nested.memory-card.json").exists());
    }
}
