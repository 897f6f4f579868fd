//! Compiling many phrases at once.
//!
//! Phrases are independent: one rejected phrase never affects another, and
//! results keep input order regardless of how the work is split.

use std::num::NonZeroUsize;
use std::panic;
use std::thread;

use tracing::{info, warn};

use super::engine::{CompiledPhrase, PhraseCompiler};
use super::error::CompileError;
use crate::nodes::Construct;

/// A phrase that failed to compile.
#[derive(Debug)]
pub struct PhraseFailure {
    /// Position of the phrase in the input.
    pub index: usize,
    pub error: CompileError,
}

/// Outcome of compiling a batch of phrases.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Compiled phrases with their input positions, in input order.
    pub compiled: Vec<(usize, CompiledPhrase)>,
    pub failures: Vec<PhraseFailure>,
}

impl BatchReport {
    /// Phrases to hand to extraction: compiled and not marked `doNotExtract`.
    pub fn extracted(&self) -> impl Iterator<Item = &CompiledPhrase> {
        self.compiled
            .iter()
            .map(|(_, phrase)| phrase)
            .filter(|phrase| !phrase.do_not_extract)
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, index: usize, result: Result<CompiledPhrase, CompileError>) {
        match result {
            Ok(phrase) => self.compiled.push((index, phrase)),
            Err(error) => {
                warn!(index, %error, "phrase rejected");
                self.failures.push(PhraseFailure { index, error });
            }
        }
    }
}

impl PhraseCompiler {
    /// Compile every phrase on the current thread.
    pub fn compile_batch(&self, phrases: &[Construct]) -> BatchReport {
        let mut report = BatchReport::default();
        for (index, phrase) in phrases.iter().enumerate() {
            report.record(index, self.compile(phrase));
        }
        info!(
            compiled = report.compiled.len(),
            failed = report.failures.len(),
            "compiled phrase batch"
        );
        report
    }

    /// Compile phrases across up to `workers` scoped threads.
    ///
    /// Output is identical to [`PhraseCompiler::compile_batch`].
    pub fn compile_batch_parallel(&self, phrases: &[Construct], workers: NonZeroUsize) -> BatchReport {
        let chunk_size = phrases.len().div_ceil(workers.get()).max(1);
        let chunk_results: Vec<Vec<Result<CompiledPhrase, CompileError>>> = thread::scope(|scope| {
            let handles: Vec<_> = phrases
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|phrase| self.compile(phrase))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(results) => results,
                    Err(payload) => panic::resume_unwind(payload),
                })
                .collect()
        });

        let mut report = BatchReport::default();
        for (index, result) in chunk_results.into_iter().flatten().enumerate() {
            report.record(index, result);
        }
        info!(
            compiled = report.compiled.len(),
            failed = report.failures.len(),
            workers = workers.get(),
            "compiled phrase batch"
        );
        report
    }
}
