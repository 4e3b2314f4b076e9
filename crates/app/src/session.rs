#![forbid(unsafe_code)]

use crate::config::AppConfig;
use crate::error::AppError;
use kf_core::AppData;
use kf_core::form::CostFormValues;
use kf_core::taxonomy::{Rejection, Taxonomy, TaxonomyAction, TaxonomyStore};
use kf_report::{SummaryRequest, generate};
use kf_storage::{JsonFileStore, SaveOutcome};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

/// Non-taxonomy fields persisted next to the categories.
#[derive(Clone, Debug, Default)]
struct Remembered {
    last_project_name: String,
    last_agreement_number: String,
    project_names: Vec<String>,
}

impl Remembered {
    fn snapshot(&self, categories: &Taxonomy) -> AppData {
        AppData {
            categories: categories.clone(),
            last_project_name: self.last_project_name.clone(),
            last_agreement_number: self.last_agreement_number.clone(),
            project_names: self.project_names.clone(),
        }
    }
}

/// Outcome of a successful form submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub path: PathBuf,
    pub file_name: String,
    pub merged: bool,
    /// Form state to show next: cleared except for project name and agreement number.
    pub next_form: CostFormValues,
}

/// One UI session: the taxonomy store, its on-disk mirror, and the export path.
///
/// Every accepted taxonomy action is saved through a store subscriber.
pub struct Session {
    files: JsonFileStore,
    export_dir: PathBuf,
    store: TaxonomyStore,
    remembered: Arc<Mutex<Remembered>>,
}

impl Session {
    /// Always starts: an unusable data directory leaves the defaults in memory
    /// and every save reports its failure.
    pub fn start(config: &AppConfig) -> Self {
        let files = JsonFileStore::open(&config.data_dir);
        let loaded = files.load_and_heal();
        info!(
            path = %files.data_path().display(),
            direct_groups = loaded.categories.direct.groups.len(),
            indirect_groups = loaded.categories.indirect.groups.len(),
            "session started"
        );

        let remembered = Arc::new(Mutex::new(Remembered {
            last_project_name: loaded.last_project_name,
            last_agreement_number: loaded.last_agreement_number,
            project_names: loaded.project_names,
        }));

        let mut store = TaxonomyStore::new(loaded.categories);
        {
            let files = files.clone();
            let remembered = Arc::clone(&remembered);
            store.subscribe(move |taxonomy| {
                let data = lock(&remembered).snapshot(taxonomy);
                // Failures are logged by the store; the UI carries on with in-memory state.
                let _ = files.save(&data);
            });
        }

        Self {
            files,
            export_dir: config.export_dir.clone(),
            store,
            remembered,
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        self.store.state()
    }

    pub fn data_path(&self) -> &Path {
        self.files.data_path()
    }

    pub fn app_data(&self) -> AppData {
        lock(&self.remembered).snapshot(self.store.state())
    }

    /// Applies an admin action; a rejection leaves state and disk untouched.
    pub fn apply(&mut self, action: &TaxonomyAction) -> Result<&Taxonomy, Rejection> {
        match self.store.dispatch(action) {
            Ok(state) => {
                info!(action = action.name(), "taxonomy updated");
                Ok(state)
            }
            Err(rejection) => {
                warn!(
                    action = action.name(),
                    code = rejection.code(),
                    "taxonomy action rejected"
                );
                Err(rejection)
            }
        }
    }

    /// Blank form pre-filled with the last used project name and agreement number.
    pub fn form_defaults(&self) -> CostFormValues {
        let remembered = lock(&self.remembered);
        CostFormValues {
            project_name: remembered.last_project_name.clone(),
            agreement_number: remembered.last_agreement_number.clone(),
            ..CostFormValues::default()
        }
    }

    pub fn save(&self) -> SaveOutcome {
        self.files.save(&self.app_data())
    }

    /// Validates the form, writes the summary (merged with `attachment` when
    /// possible) into the export directory, and remembers the project fields.
    pub fn submit(
        &mut self,
        values: &CostFormValues,
        attachment: Option<Vec<u8>>,
    ) -> Result<Submission, AppError> {
        let form = values.validate().map_err(AppError::InvalidForm)?;
        let request = SummaryRequest {
            group_label: form.group_label(),
            category_label: form.category_label(self.store.state()),
            project_name: form.project_name.clone(),
            agreement_number: form.agreement_number.clone(),
            cost_type: form.cost_type,
            notes: form.notes.clone(),
            attachment,
        };
        let document = generate(&request)?;

        std::fs::create_dir_all(&self.export_dir).map_err(|source| AppError::Io {
            path: self.export_dir.clone(),
            source,
        })?;
        let path = self.export_dir.join(&document.file_name);
        std::fs::write(&path, &document.bytes).map_err(|source| AppError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), merged = document.merged, "cost summary exported");

        {
            let mut remembered = lock(&self.remembered);
            remembered.last_project_name = form.project_name;
            remembered.last_agreement_number = form.agreement_number;
        }
        let _ = self.save();

        Ok(Submission {
            path,
            file_name: document.file_name,
            merged: document.merged,
            next_form: values.reset_after_submit(),
        })
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("data_path", &self.files.data_path())
            .field("export_dir", &self.export_dir)
            .finish_non_exhaustive()
    }
}

/// Reads an attachment chosen by the user; unreadable files are logged and skipped.
pub fn read_attachment(path: &Path) -> Option<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "attachment unreadable, exporting summary only");
            None
        }
    }
}

fn lock(remembered: &Mutex<Remembered>) -> std::sync::MutexGuard<'_, Remembered> {
    remembered.lock().unwrap_or_else(PoisonError::into_inner)
}
