//! Run orchestrator.
//!
//! Drives the per-company, per-task search loop: plans queries, invokes the
//! fetcher one task at a time, isolates per-task failures, feeds survivors
//! to the aggregator, and seals each company when its last task finishes.

use crate::error::{AppError, Result};
use crate::models::{CompanyRecord, CompanyResult, Config, JobCategory, JobPosting, NO_LOCATION};
use crate::services::{extract, planner, CompanyAggregate, PageFetcher, TitleCleaner};

/// User-selected run configuration.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Categories to search, in any order; tasks follow taxonomy order
    pub categories: Vec<JobCategory>,

    /// Run-level location filter, OR-combined into every query
    pub location_filter: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            categories: vec![JobCategory::Quality, JobCategory::Regulatory],
            location_filter: None,
        }
    }
}

/// Lifecycle of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    NotStarted,
    Running,
    Completed,
    Aborted,
}

/// Process-scoped state of one orchestration call.
///
/// Discarded after the run; there is no cross-run persistence.
#[derive(Debug)]
pub struct RunState {
    /// Sealed company results, in input order
    pub results: Vec<CompanyResult>,

    /// Tasks finished so far (failed tasks count too)
    pub completed_tasks: usize,

    /// Total planned tasks across all companies
    pub total_tasks: usize,

    /// Current run status
    pub status: RunStatus,
}

impl RunState {
    fn new(total_tasks: usize) -> Self {
        Self {
            results: Vec::new(),
            completed_tasks: 0,
            total_tasks,
            status: RunStatus::NotStarted,
        }
    }
}

/// Observer for run progress and warnings.
pub trait ProgressSink {
    /// A task finished (successfully or not); `completed / total` is the
    /// progress fraction.
    fn on_task_complete(&mut self, completed: usize, total: usize, message: &str);

    /// A task failed and was skipped.
    fn on_warning(&mut self, message: &str);

    /// A company's result set was sealed.
    fn on_company_sealed(&mut self, result: &CompanyResult);

    /// The whole run was aborted before completion.
    fn on_run_aborted(&mut self, reason: &str);
}

/// Default sink that reports through the log facade.
#[derive(Debug, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn on_task_complete(&mut self, completed: usize, total: usize, message: &str) {
        log::info!("[{completed}/{total}] {message}");
    }

    fn on_warning(&mut self, message: &str) {
        log::warn!("{message}");
    }

    fn on_company_sealed(&mut self, result: &CompanyResult) {
        log::info!(
            "{}: sealed with {} posting(s)",
            result.company,
            result.posting_count()
        );
    }

    fn on_run_aborted(&mut self, reason: &str) {
        log::error!("Run aborted: {reason}");
    }
}

/// Sequential search orchestrator.
///
/// One fetch is in flight at a time; ordering of companies, categories and
/// tasks is fully deterministic given identical inputs and responses.
pub struct Orchestrator<'a> {
    config: &'a Config,
    cleaner: TitleCleaner,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            cleaner: TitleCleaner::new(&config.cleaning),
        }
    }

    /// Run the full per-company, per-task loop.
    ///
    /// Per-task fetch failures contribute zero candidates and a warning;
    /// only `InvalidInput` (before anything is processed) and
    /// `FatalFetcher` (mid-run) escape. On success, `results` is sealed,
    /// immutable, and ready for export.
    pub async fn run(
        &self,
        companies: &[CompanyRecord],
        options: &RunOptions,
        fetcher: &dyn PageFetcher,
        sink: &mut dyn ProgressSink,
    ) -> Result<RunState> {
        if !companies.iter().any(|c| !c.name.trim().is_empty()) {
            return Err(AppError::invalid_input(
                "company list has no row with a non-empty name",
            ));
        }
        if options.categories.is_empty() {
            return Err(AppError::invalid_input("no categories selected"));
        }

        // Selection is normalized to declared order so two runs with the
        // same set of categories produce identical results.
        let mut categories = options.categories.clone();
        categories.sort_unstable();
        categories.dedup();

        // Plan everything up front: InvalidInput fails fast, and the total
        // task count is known before the first fetch.
        let location = options.location_filter.as_deref();
        let mut plans = Vec::with_capacity(companies.len());
        for record in companies {
            let tasks = planner::plan(record, &categories, location, self.config)?;
            plans.push((record, tasks));
        }

        let total_tasks = plans.iter().map(|(_, tasks)| tasks.len()).sum();
        let mut state = RunState::new(total_tasks);
        state.status = RunStatus::Running;

        for (record, tasks) in plans {
            let mut aggregate = CompanyAggregate::new(record.name.trim(), &categories);

            for task in &tasks {
                match fetcher.fetch(&task.query).await {
                    Ok(elements) => {
                        let candidates = extract::extract(task, &elements, self.config);
                        let postings = candidates.into_iter().filter_map(|candidate| {
                            let title = self.cleaner.normalize(&candidate.title)?;
                            Some(JobPosting {
                                company: task.company.clone(),
                                category: task.category,
                                platform: task.platform.clone(),
                                title,
                                url: candidate.href,
                                location: NO_LOCATION.to_string(),
                            })
                        });
                        aggregate.add(task.category, postings);
                    }
                    Err(e @ AppError::FatalFetcher(_)) => {
                        state.status = RunStatus::Aborted;
                        sink.on_run_aborted(&e.to_string());
                        return Err(e);
                    }
                    Err(e) => {
                        sink.on_warning(&format!("{}: task skipped: {e}", task.company));
                    }
                }

                state.completed_tasks += 1;
                sink.on_task_complete(
                    state.completed_tasks,
                    state.total_tasks,
                    &format!("{}: {} / {}", task.company, task.category, task.platform),
                );
            }

            let result = aggregate.seal();
            sink.on_company_sealed(&result);
            state.results.push(result);
        }

        state.status = RunStatus::Completed;
        Ok(state)
    }

    /// Record a run that could not start because the fetcher was
    /// unavailable. No company is processed and nothing is exportable.
    pub fn abort(&self, reason: &AppError, sink: &mut dyn ProgressSink) -> RunState {
        sink.on_run_aborted(&reason.to_string());
        let mut state = RunState::new(0);
        state.status = RunStatus::Aborted;
        state
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::NO_JOBS_FOUND;
    use crate::services::PageElement;

    /// Fetcher that serves canned elements per query substring and can be
    /// scripted to fail on specific call numbers.
    struct ScriptedFetcher {
        responses: Vec<(&'static str, Vec<PageElement>)>,
        fail_on_calls: Vec<usize>,
        fatal_on_call: Option<usize>,
        calls: Mutex<usize>,
    }

    impl ScriptedFetcher {
        fn empty() -> Self {
            Self {
                responses: Vec::new(),
                fail_on_calls: Vec::new(),
                fatal_on_call: None,
                calls: Mutex::new(0),
            }
        }

        fn with_responses(responses: Vec<(&'static str, Vec<PageElement>)>) -> Self {
            Self {
                responses,
                ..Self::empty()
            }
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch(&self, query: &str) -> Result<Vec<PageElement>> {
            let call = {
                let mut calls = self.calls.lock().unwrap();
                *calls += 1;
                *calls
            };
            if self.fatal_on_call == Some(call) {
                return Err(AppError::fatal_fetcher("session died"));
            }
            if self.fail_on_calls.contains(&call) {
                return Err(AppError::fetch(query, "timeout"));
            }
            Ok(self
                .responses
                .iter()
                .filter(|(needle, _)| query.contains(needle))
                .flat_map(|(_, elements)| elements.clone())
                .collect())
        }
    }

    /// Sink that records every callback for assertions.
    #[derive(Default)]
    struct RecordingSink {
        ticks: Vec<(usize, usize)>,
        warnings: Vec<String>,
        sealed: Vec<String>,
        aborted: Vec<String>,
    }

    impl ProgressSink for RecordingSink {
        fn on_task_complete(&mut self, completed: usize, total: usize, _message: &str) {
            self.ticks.push((completed, total));
        }
        fn on_warning(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }
        fn on_company_sealed(&mut self, result: &CompanyResult) {
            self.sealed.push(result.company.clone());
        }
        fn on_run_aborted(&mut self, reason: &str) {
            self.aborted.push(reason.to_string());
        }
    }

    fn element(href: &str, text: &str) -> PageElement {
        PageElement {
            href: href.into(),
            text: text.into(),
            context: String::new(),
        }
    }

    /// Minimal config: one term per category, one platform, so each company
    /// yields exactly `categories` tasks.
    fn small_config() -> Config {
        let mut config = Config::default();
        for spec in &mut config.categories {
            spec.search_terms.truncate(1);
        }
        config.platforms.retain(|p| p.name == "Indeed");
        config
    }

    fn companies(names: &[&str]) -> Vec<CompanyRecord> {
        names.iter().map(|n| CompanyRecord::new(*n)).collect()
    }

    #[tokio::test]
    async fn empty_company_list_fails_fast() {
        let config = small_config();
        let orchestrator = Orchestrator::new(&config);
        let mut sink = RecordingSink::default();
        let err = orchestrator
            .run(&[], &RunOptions::default(), &ScriptedFetcher::empty(), &mut sink)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(sink.ticks.is_empty());
    }

    #[tokio::test]
    async fn run_completes_and_seals_every_company() {
        let config = small_config();
        let orchestrator = Orchestrator::new(&config);
        let fetcher = ScriptedFetcher::with_responses(vec![(
            "quality",
            vec![element("https://www.indeed.com/viewjob?jk=1", "Quality Engineer job")],
        )]);
        let mut sink = RecordingSink::default();

        let state = orchestrator
            .run(&companies(&["Acme", "Globex"]), &RunOptions::default(), &fetcher, &mut sink)
            .await
            .unwrap();

        assert_eq!(state.status, RunStatus::Completed);
        // 2 companies x 2 categories x 1 term x 1 platform.
        assert_eq!(state.total_tasks, 4);
        assert_eq!(state.completed_tasks, 4);
        assert_eq!(sink.sealed, vec!["Acme", "Globex"]);

        for result in &state.results {
            assert_eq!(
                result.by_category[&JobCategory::Quality][0].title,
                "Quality Engineer job"
            );
            // No regulatory responses were scripted.
            assert_eq!(
                result.by_category[&JobCategory::Regulatory][0].url,
                NO_JOBS_FOUND
            );
        }
    }

    #[tokio::test]
    async fn runs_are_deterministic() {
        let config = small_config();
        let orchestrator = Orchestrator::new(&config);
        let responses = vec![
            (
                "quality",
                vec![
                    element("https://www.indeed.com/viewjob?jk=1", "Quality Engineer job"),
                    element("https://www.indeed.com/viewjob?jk=2", "Quality Manager job"),
                ],
            ),
            (
                "regulatory",
                vec![element("https://www.indeed.com/viewjob?jk=3", "Regulatory Lead job")],
            ),
        ];

        let mut runs = Vec::new();
        for _ in 0..2 {
            let fetcher = ScriptedFetcher::with_responses(responses.clone());
            let mut sink = RecordingSink::default();
            let state = orchestrator
                .run(&companies(&["Acme", "Globex"]), &RunOptions::default(), &fetcher, &mut sink)
                .await
                .unwrap();
            runs.push(state.results);
        }
        assert_eq!(runs[0], runs[1]);
    }

    #[tokio::test]
    async fn failed_task_is_isolated() {
        // Extend quality to two term variants so each of the 3 companies
        // owns exactly 3 tasks (9 total).
        let mut config = small_config();
        if let Some(spec) = config
            .categories
            .iter_mut()
            .find(|s| s.category == JobCategory::Quality)
        {
            spec.search_terms.push("quality assurance jobs".into());
        }
        let orchestrator = Orchestrator::new(&config);

        // Task 4 of 9 (first task of the second company) times out.
        let fetcher = ScriptedFetcher {
            fail_on_calls: vec![4],
            ..ScriptedFetcher::with_responses(vec![(
                "quality",
                vec![element("https://www.indeed.com/viewjob?jk=1", "Quality Engineer job")],
            )])
        };
        let mut sink = RecordingSink::default();

        let state = orchestrator
            .run(
                &companies(&["Acme", "Globex", "Initech"]),
                &RunOptions::default(),
                &fetcher,
                &mut sink,
            )
            .await
            .unwrap();

        assert_eq!(state.status, RunStatus::Completed);
        assert_eq!(state.total_tasks, 9);
        assert_eq!(sink.ticks.len(), 9);
        assert_eq!(*sink.ticks.last().unwrap(), (9, 9));
        assert_eq!(sink.warnings.len(), 1);
        assert!(sink.warnings[0].contains("Globex"));

        // Globex still sealed with data from its surviving quality task.
        let globex = &state.results[1];
        assert_eq!(globex.company, "Globex");
        assert!(
            globex.by_category[&JobCategory::Quality]
                .iter()
                .any(|p| !p.is_sentinel())
        );
        assert_eq!(sink.sealed.len(), 3);
    }

    #[tokio::test]
    async fn fatal_fetcher_aborts_mid_run() {
        let config = small_config();
        let orchestrator = Orchestrator::new(&config);
        let fetcher = ScriptedFetcher {
            fatal_on_call: Some(3),
            ..ScriptedFetcher::empty()
        };
        let mut sink = RecordingSink::default();

        let err = orchestrator
            .run(&companies(&["Acme", "Globex"]), &RunOptions::default(), &fetcher, &mut sink)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::FatalFetcher(_)));
        assert_eq!(sink.aborted.len(), 1);
        // The second company never sealed.
        assert_eq!(sink.sealed, vec!["Acme"]);
    }

    #[tokio::test]
    async fn abort_before_start_seals_nothing() {
        let config = small_config();
        let orchestrator = Orchestrator::new(&config);
        let mut sink = RecordingSink::default();

        let reason = AppError::fatal_fetcher("client build failed");
        let state = orchestrator.abort(&reason, &mut sink);

        assert_eq!(state.status, RunStatus::Aborted);
        assert!(state.results.is_empty());
        assert_eq!(sink.aborted.len(), 1);
        assert!(sink.sealed.is_empty());
    }

    #[tokio::test]
    async fn shared_href_lands_in_both_categories() {
        let config = small_config();
        let orchestrator = Orchestrator::new(&config);
        // The same posting mentions both quality and regulatory keywords,
        // so both categories' tasks extract it.
        let qara = element(
            "https://www.indeed.com/viewjob?jk=7",
            "Quality and Regulatory Affairs Manager job",
        );
        let fetcher = ScriptedFetcher::with_responses(vec![
            ("quality", vec![qara.clone()]),
            ("regulatory", vec![qara]),
        ]);
        let mut sink = RecordingSink::default();

        let state = orchestrator
            .run(&companies(&["Acme"]), &RunOptions::default(), &fetcher, &mut sink)
            .await
            .unwrap();

        let result = &state.results[0];
        let url = "https://www.indeed.com/viewjob?jk=7";
        assert!(
            result.by_category[&JobCategory::Quality]
                .iter()
                .any(|p| p.url == url)
        );
        assert!(
            result.by_category[&JobCategory::Regulatory]
                .iter()
                .any(|p| p.url == url)
        );
    }

    #[tokio::test]
    async fn duplicate_selection_is_collapsed() {
        let config = small_config();
        let orchestrator = Orchestrator::new(&config);
        let options = RunOptions {
            categories: vec![JobCategory::Quality, JobCategory::Quality],
            location_filter: None,
        };
        let mut sink = RecordingSink::default();
        let state = orchestrator
            .run(&companies(&["Acme"]), &options, &ScriptedFetcher::empty(), &mut sink)
            .await
            .unwrap();
        assert_eq!(state.total_tasks, 1);
        let categories: Vec<_> = state.results[0].by_category.keys().collect();
        assert_eq!(categories, vec![&JobCategory::Quality]);
    }

    #[tokio::test]
    async fn progress_counts_tasks_not_companies() {
        let config = small_config();
        let orchestrator = Orchestrator::new(&config);
        let mut sink = RecordingSink::default();
        orchestrator
            .run(&companies(&["Acme", "Globex"]), &RunOptions::default(), &ScriptedFetcher::empty(), &mut sink)
            .await
            .unwrap();
        let expected: Vec<(usize, usize)> = (1..=4).map(|i| (i, 4)).collect();
        assert_eq!(sink.ticks, expected);
    }
}
