//! `load`: collect dictionary literals into the per-locale datasets.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::types::{
    LoadReport,
    ProcessError,
};
use super::{
    Workspace,
    record,
};
use crate::config::{
    FileKind,
    MarkupScan,
};
use crate::dataset::{
    LoadAggregate,
    dataset_file_name,
    list_datasets,
    read_dataset,
    write_dataset,
};
use crate::input::{
    WorkspaceFile,
    find_files,
};

impl Workspace {
    /// Scans the sources and brings every persisted dataset up to date.
    ///
    /// New translations are appended, entries whose key no longer exists in
    /// any source are removed, and datasets without changes are not written.
    /// Nothing is written when no literal yielded a single translation.
    pub fn load(&self) -> LoadReport {
        let mut report = LoadReport::default();
        let mut aggregate = LoadAggregate::new();

        let scripts = find_files(&self.matcher, FileKind::Script);
        self.collect(&scripts, &mut aggregate, &mut report);

        let scan_markup = match self.settings.markup_scan {
            MarkupScan::Always => true,
            MarkupScan::Never => false,
            MarkupScan::Fallback => aggregate.is_empty(),
        };
        if scan_markup {
            if self.settings.markup_scan == MarkupScan::Fallback {
                tracing::info!("No translatable script files found, trying with markup");
            }
            let documents = find_files(&self.matcher, FileKind::Markup);
            self.collect(&documents, &mut aggregate, &mut report);
        }

        report.literals = aggregate.literal_count();
        if aggregate.is_empty() {
            tracing::warn!("No translations found; datasets are left untouched");
            return report;
        }

        self.write_datasets(&aggregate, &mut report);
        report
    }

    /// Scans `files` and records every literal that evaluates into `aggregate`.
    fn collect(
        &self,
        files: &[WorkspaceFile],
        aggregate: &mut LoadAggregate,
        report: &mut LoadReport,
    ) {
        for file in files {
            report.scanned_files += 1;
            let Some(scanned) = self.scan_file(file, &mut report.errors) else {
                continue;
            };

            for found in scanned.literals {
                match aggregate.record_literal(&file.relative, &found.value) {
                    Ok(count) => tracing::debug!(file = %file.relative, count, "Recorded translations"),
                    Err(source) => record(
                        &mut report.errors,
                        ProcessError::Shape { path: file.relative.clone(), range: found.range, source },
                    ),
                }
            }
        }
    }

    /// Merges the findings into every known locale and writes what changed.
    fn write_datasets(&self, aggregate: &LoadAggregate, report: &mut LoadReport) {
        let output_dir = self.output_dir();
        let persisted = match list_datasets(&output_dir) {
            Ok(persisted) => persisted,
            Err(source) => {
                let path = self.display_path(&output_dir);
                record(&mut report.errors, ProcessError::Dataset { path, source });
                return;
            }
        };

        // every locale found in a literal or already persisted
        let mut locales: BTreeMap<String, Option<PathBuf>> =
            aggregate.found_locales().map(|locale| (locale.to_string(), None)).collect();
        for dataset in persisted {
            locales.insert(dataset.locale, Some(dataset.path));
        }

        for (locale, existing_path) in locales {
            let path = existing_path
                .clone()
                .unwrap_or_else(|| output_dir.join(dataset_file_name(&locale)));
            let shown = self.display_path(&path);

            let existing = match existing_path.map(|p| read_dataset(&p, self.fallback)).transpose() {
                Ok(existing) => existing,
                Err(source) => {
                    record(&mut report.errors, ProcessError::Dataset { path: shown, source });
                    continue;
                }
            };

            let merge = aggregate.merge_locale(&locale, existing);
            if merge.created {
                tracing::info!("Creating {shown}");
            } else {
                tracing::info!("Updating {shown}");
            }
            for key in &merge.added {
                tracing::info!("  + {key}");
            }
            for key in &merge.removed {
                tracing::info!("  - {key}");
            }

            if !merge.is_changed() {
                tracing::info!("  = no changes");
                report.unchanged.push(locale);
                continue;
            }

            match write_dataset(&path, &merge.entries) {
                Ok(()) if merge.created => report.created.push(locale),
                Ok(()) => report.updated.push(locale),
                Err(source) => {
                    record(&mut report.errors, ProcessError::Dataset { path: shown, source });
                }
            }
        }
    }
}
