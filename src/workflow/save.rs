//! `save`: write the persisted translations back into the source literals.

use super::types::{
    ProcessError,
    SaveReport,
};
use super::{
    Workspace,
    record,
};
use crate::dataset::{
    FileTranslations,
    SaveAggregate,
    list_datasets,
    merge_for_save,
    read_dataset,
};
use crate::input::{
    WorkspaceFile,
    write_text_file,
};
use crate::splice::{
    Replacement,
    line_indent,
    splice,
};

impl Workspace {
    /// Merges every persisted dataset into the literals of the files its keys
    /// name and rewrites those files.
    ///
    /// A file whose text comes out unchanged is not rewritten.
    pub fn save(&self) -> SaveReport {
        let mut report = SaveReport::default();
        let output_dir = self.output_dir();

        let datasets = match list_datasets(&output_dir) {
            Ok(datasets) => datasets,
            Err(source) => {
                let path = self.display_path(&output_dir);
                record(&mut report.errors, ProcessError::Dataset { path, source });
                return report;
            }
        };
        if datasets.is_empty() {
            tracing::warn!("No datasets found in {}", self.display_path(&output_dir));
            return report;
        }

        let mut aggregate = SaveAggregate::new();
        for dataset in &datasets {
            match read_dataset(&dataset.path, self.fallback) {
                Ok(entries) => {
                    let count = aggregate.record_dataset(&dataset.locale, &entries);
                    tracing::debug!(locale = %dataset.locale, count, "Read dataset");
                }
                Err(source) => {
                    let path = self.display_path(&dataset.path);
                    record(&mut report.errors, ProcessError::Dataset { path, source });
                }
            }
        }

        for (relative, translations) in aggregate.files() {
            self.save_file(relative, translations, &mut report);
        }
        report
    }

    /// Merges the translations for `relative` into its literals and rewrites the file.
    fn save_file(&self, relative: &str, translations: &FileTranslations, report: &mut SaveReport) {
        let Some(path) = self.resolve(relative).filter(|path| path.is_file()) else {
            record(&mut report.errors, ProcessError::MissingTarget { path: relative.to_string() });
            return;
        };
        tracing::info!("Updating {relative}");

        let file = WorkspaceFile { relative: relative.to_string(), path };
        let Some(scanned) = self.scan_file(&file, &mut report.errors) else {
            return;
        };

        let mut replacements = Vec::new();
        for mut found in scanned.literals {
            match merge_for_save(&mut found.value, translations) {
                Ok(merge) => {
                    tracing::debug!(updated = merge.updated, added = merge.added, "Merged literal");
                }
                Err(source) => {
                    record(
                        &mut report.errors,
                        ProcessError::Shape { path: file.relative.clone(), range: found.range, source },
                    );
                    continue;
                }
            }

            replacements.push(Replacement {
                span: found.literal.value,
                indent: line_indent(&scanned.text, found.literal.statement.start),
                value: found.value,
            });
        }

        let content = match splice(&scanned.text, &replacements, self.settings.indent_width) {
            Ok(content) => content,
            Err(source) => {
                record(&mut report.errors, ProcessError::Splice { path: file.relative, source });
                return;
            }
        };

        tracing::info!("  Replacing {} section(s) of {relative}", replacements.len());
        report.replaced_sections += replacements.len();

        if content == scanned.text {
            tracing::info!("  = no changes");
            report.unchanged_files.push(file.relative);
            return;
        }

        match write_text_file(&file.path, &content) {
            Ok(()) => report.updated_files.push(file.relative),
            Err(source) => {
                record(&mut report.errors, ProcessError::Write { path: file.relative, source });
            }
        }
    }
}
