//! Per-item outcome reporting for batch stages.
//!
//! Both stages skip a failing file and move on. Instead of leaving the
//! reason only in the log, every discovered file gets an [`ItemReport`]
//! recording either what it produced or why it was skipped.

use std::path::{Path, PathBuf};

/// Outcome for a single input file.
#[derive(Debug)]
pub enum ItemStatus<T, E> {
    /// The file was processed and produced `T`
    Done(T),
    /// The file was skipped because of `E`
    Skipped(E),
}

#[derive(Debug)]
pub struct ItemReport<T, E> {
    pub source: PathBuf,
    pub status: ItemStatus<T, E>,
}

impl<T, E> ItemReport<T, E> {
    pub fn done(source: impl Into<PathBuf>, output: T) -> Self {
        Self {
            source: source.into(),
            status: ItemStatus::Done(output),
        }
    }

    pub fn skipped(source: impl Into<PathBuf>, reason: E) -> Self {
        Self {
            source: source.into(),
            status: ItemStatus::Skipped(reason),
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.status, ItemStatus::Done(_))
    }
}

/// Summary of one batch stage, in processing order.
#[derive(Debug)]
pub struct StageReport<T, E> {
    /// Number of files found by discovery
    pub discovered: usize,
    pub items: Vec<ItemReport<T, E>>,
}

impl<T, E> StageReport<T, E> {
    pub fn new(discovered: usize) -> Self {
        Self {
            discovered,
            items: Vec::with_capacity(discovered),
        }
    }

    pub fn push(&mut self, item: ItemReport<T, E>) {
        self.items.push(item);
    }

    pub fn completed(&self) -> usize {
        self.items.iter().filter(|item| item.is_done()).count()
    }

    pub fn skipped(&self) -> usize {
        self.items.len() - self.completed()
    }

    /// Outputs of the successful items, in order.
    pub fn outputs(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter_map(|item| match &item.status {
            ItemStatus::Done(output) => Some(output),
            ItemStatus::Skipped(_) => None,
        })
    }

    /// Source paths and reasons of the skipped items, in order.
    pub fn skip_reasons(&self) -> impl Iterator<Item = (&Path, &E)> {
        self.items.iter().filter_map(|item| match &item.status {
            ItemStatus::Skipped(reason) => Some((item.source.as_path(), reason)),
            ItemStatus::Done(_) => None,
        })
    }
}
