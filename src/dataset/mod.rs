//! Dataset merge engine and the persisted per-locale datasets.
pub mod key;
pub mod load;
pub mod save;
pub mod store;
pub mod types;

pub use key::QualifiedKey;
pub use load::{
    LoadAggregate,
    LoadMerge,
};
pub use save::{
    SaveAggregate,
    SaveMerge,
    merge_for_save,
};
pub use store::{
    PersistedDataset,
    dataset_file_name,
    list_datasets,
    read_dataset,
    write_dataset,
};
pub use types::{
    DatasetError,
    FileTranslations,
    LocaleEntries,
};
