mod datapoint;
mod filename;
mod mask;
mod merge;
mod resolve;
mod survey;
mod table;
mod vocabulary;

pub use datapoint::{Datapoint, DatapointKey, Joint2d, Joint3d};

pub use filename::SourceMetadata;
pub use filename::companion_3d_path;
pub use filename::parse_filename;

pub use mask::PresenceMask;

pub use merge::{Row3d, backfill_render_keys, dedup_first, merge};

pub use resolve::{FlatLayout, ImageLayout, ImageResolver, SubjectNestedLayout, image_file_name};

pub use survey::{bone_counts, bone_superset, collect_3d_exports};

pub use table::PoseTable;

pub use vocabulary::BoneVocabulary;
