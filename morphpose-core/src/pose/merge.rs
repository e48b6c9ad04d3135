// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::constant::{
    BONE, CAMERA, FOCAL_LENGTH, FRAME, RENDER_KEY_COLUMNS, REQUIRED_2D_COLUMNS,
    REQUIRED_3D_COLUMNS, X, Y, Z,
};
use crate::error::PoseError;
use crate::pose::{Datapoint, Joint2d, Joint3d, PoseTable, PresenceMask, SourceMetadata};
use crate::ut;

/// A 2D export row, nulls preserved
#[derive(Debug, Clone)]
struct Row2d {
    frame: Option<i64>,
    camera: Option<String>,
    focal_length: Option<String>,
    bone: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
}

/// A 3D export row keyed by frame and bone
///
/// Camera and focal length are optional since many 3D exports omit them;
/// they can be recovered from the 2D export with [`backfill_render_keys`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row3d {
    pub frame: i64,
    pub bone: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub camera: Option<String>,
    pub focal_length: Option<String>,
}

impl Row3d {
    fn joint(&self) -> Option<Joint3d> {
        Some(Joint3d {
            bone: self.bone.clone(),
            x: self.x?,
            y: self.y?,
            z: self.z?,
        })
    }
}

/// Distinct (frame, bone, camera, focal length) tuples of a 2D export
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RenderKey {
    frame: i64,
    bone: String,
    camera: String,
    focal_length: String,
}

type GroupKey = (i64, String, String);

/// NaN and infinite coordinates count as missing
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn read_rows_2d(table: &PoseTable) -> Result<Vec<Row2d>, PoseError> {
    let frames = table.integers(FRAME)?;
    let mut cameras = table.strings(CAMERA)?.into_iter();
    let mut focal_lengths = table.strings(FOCAL_LENGTH)?.into_iter();
    let mut bones = table.strings(BONE)?.into_iter();
    let mut xs = table.floats(X)?.into_iter();
    let mut ys = table.floats(Y)?.into_iter();

    Ok(frames
        .into_iter()
        .map(|frame| Row2d {
            frame,
            camera: cameras.next().flatten(),
            focal_length: focal_lengths.next().flatten(),
            bone: bones.next().flatten(),
            x: finite(xs.next().flatten()),
            y: finite(ys.next().flatten()),
        })
        .collect())
}

/// Read 3D rows in file order, dropping rows without a frame or bone
fn read_rows_3d(table: &PoseTable) -> Result<(Vec<Row3d>, usize), PoseError> {
    let frames = table.integers(FRAME)?;
    let mut bones = table.strings(BONE)?.into_iter();
    let mut xs = table.floats(X)?.into_iter();
    let mut ys = table.floats(Y)?.into_iter();
    let mut zs = table.floats(Z)?.into_iter();

    let n = frames.len();
    let mut cameras = optional_strings(table, CAMERA, n)?.into_iter();
    let mut focal_lengths = optional_strings(table, FOCAL_LENGTH, n)?.into_iter();

    let mut dropped = 0;
    let mut rows = Vec::with_capacity(n);

    for frame in frames {
        let bone = bones.next().flatten();
        let x = finite(xs.next().flatten());
        let y = finite(ys.next().flatten());
        let z = finite(zs.next().flatten());
        let camera = cameras.next().flatten();
        let focal_length = focal_lengths.next().flatten();

        match (frame, bone) {
            (Some(frame), Some(bone)) => rows.push(Row3d {
                frame,
                bone,
                x,
                y,
                z,
                camera,
                focal_length,
            }),
            _ => dropped += 1,
        }
    }

    Ok((rows, dropped))
}

fn optional_strings(
    table: &PoseTable,
    logical: &str,
    n: usize,
) -> Result<Vec<Option<String>>, PoseError> {
    if table.has_column(logical) {
        table.strings(logical)
    } else {
        Ok(vec![None; n])
    }
}

fn render_keys(rows: &[Row2d]) -> Vec<RenderKey> {
    let mut seen: HashSet<RenderKey> = HashSet::new();
    let mut keys = Vec::new();

    for row in rows {
        if let (Some(frame), Some(bone), Some(camera), Some(focal_length)) =
            (row.frame, &row.bone, &row.camera, &row.focal_length)
        {
            let key = RenderKey {
                frame,
                bone: bone.clone(),
                camera: camera.clone(),
                focal_length: focal_length.clone(),
            };

            if seen.insert(key.clone()) {
                keys.push(key);
            }
        }
    }

    keys
}

/// Fill missing camera and focal length on 3D rows from a 2D export
///
/// Each 3D row missing a camera or focal length is left-joined on (frame,
/// bone) against the distinct 2D render keys that agree with whichever key
/// it already carries, so a row matching several cameras is repeated once
/// per match in 2D order. Rows without a match keep their keys as they are.
/// Rows carrying both keys are untouched, which makes a second pass a no-op.
///
/// # Arguments
///
/// * `rows` - 3D rows in file order
/// * `table_2d` - The 2D export of the same subject and action
pub fn backfill_render_keys(
    rows: Vec<Row3d>,
    table_2d: &PoseTable,
) -> Result<Vec<Row3d>, PoseError> {
    let keys = render_keys(&read_rows_2d(table_2d)?);
    Ok(backfill_from_keys(rows, &keys))
}

fn backfill_from_keys(rows: Vec<Row3d>, keys: &[RenderKey]) -> Vec<Row3d> {
    let mut lookup: HashMap<(i64, String), Vec<&RenderKey>> = HashMap::new();
    for key in keys {
        lookup
            .entry((key.frame, key.bone.clone()))
            .or_default()
            .push(key);
    }

    let mut filled = Vec::with_capacity(rows.len());

    for row in rows {
        if row.camera.is_some() && row.focal_length.is_some() {
            filled.push(row);
            continue;
        }

        let matches: Vec<&RenderKey> = lookup
            .get(&(row.frame, row.bone.clone()))
            .map(|keys| {
                keys.iter()
                    .copied()
                    .filter(|key| row.camera.as_ref().is_none_or(|c| *c == key.camera))
                    .filter(|key| {
                        row.focal_length
                            .as_ref()
                            .is_none_or(|f| *f == key.focal_length)
                    })
                    .collect()
            })
            .unwrap_or_default();

        if matches.is_empty() {
            filled.push(row);
            continue;
        }

        for key in matches {
            filled.push(Row3d {
                camera: Some(key.camera.clone()),
                focal_length: Some(key.focal_length.clone()),
                ..row.clone()
            });
        }
    }

    filled
}

/// Keep the first row of every (frame, bone) pair, preserving order
///
/// # Examples
///
/// ```
/// use morphpose_core::pose::{Row3d, dedup_first};
///
/// let row = |frame: i64, bone: &str, x: f64| Row3d {
///     frame,
///     bone: bone.to_string(),
///     x: Some(x),
///     y: Some(0.0),
///     z: Some(0.0),
///     camera: None,
///     focal_length: None,
/// };
///
/// let rows = dedup_first(vec![row(0, "Head", 1.0), row(0, "Head", 2.0), row(1, "Head", 3.0)]);
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].x, Some(1.0));
/// ```
pub fn dedup_first(rows: Vec<Row3d>) -> Vec<Row3d> {
    let mut seen: HashSet<(i64, String)> = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| seen.insert((row.frame, row.bone.clone())))
        .collect()
}

/// Order labels numerically when both parse as numbers, else as strings
fn compare_labels(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

fn compare_groups(a: &GroupKey, b: &GroupKey) -> Ordering {
    a.0.cmp(&b.0)
        .then_with(|| compare_labels(&a.1, &b.1))
        .then_with(|| compare_labels(&a.2, &b.2))
}

/// Join a subject's 2D and 3D exports into datapoints
///
/// One datapoint is emitted per distinct (frame, camera, focal length) of the
/// 2D export, ordered by frame, camera and then focal length. Its 3D pose is
/// the frame's 3D rows after keep-first deduplication on (frame, bone); a
/// frame without 3D rows gets an empty 3D pose and frames present only in 3D
/// produce nothing.
///
/// # Arguments
///
/// * `table_2d` - 2D export with frame, camera, bone, x, y and focal length
/// * `table_3d` - 3D export with at least frame, bone, x, y and z
/// * `meta_2d` - Metadata of the 2D file, source of subject and action
/// * `meta_3d` - Metadata of the 3D file
/// * `mask` - Presence mask shared by every datapoint of the pair
pub fn merge(
    table_2d: &PoseTable,
    table_3d: &PoseTable,
    meta_2d: &SourceMetadata,
    meta_3d: &SourceMetadata,
    mask: &PresenceMask,
) -> Result<Vec<Datapoint>, PoseError> {
    table_2d.require(&REQUIRED_2D_COLUMNS)?;
    table_3d.require(&REQUIRED_3D_COLUMNS)?;

    let rows_2d = read_rows_2d(table_2d)?;
    let (mut rows_3d, dropped_3d) = read_rows_3d(table_3d)?;

    if !RENDER_KEY_COLUMNS
        .iter()
        .all(|column| table_3d.has_column(column))
    {
        rows_3d = backfill_from_keys(rows_3d, &render_keys(&rows_2d));
    }

    let rows_3d = dedup_first(rows_3d);

    let mut incomplete_3d = 0;
    let mut pose_3d_by_frame: HashMap<i64, Vec<Joint3d>> = HashMap::new();

    for row in rows_3d.iter() {
        match row.joint() {
            Some(joint) => pose_3d_by_frame.entry(row.frame).or_default().push(joint),
            None => incomplete_3d += 1,
        }
    }

    let mut dropped_2d = 0;
    let mut incomplete_2d = 0;
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<Joint2d>)> = Vec::new();

    for row in rows_2d {
        let (Some(frame), Some(camera), Some(focal_length)) =
            (row.frame, row.camera, row.focal_length)
        else {
            dropped_2d += 1;
            continue;
        };

        let key: GroupKey = (frame, camera, focal_length);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });

        match (row.bone, row.x, row.y) {
            (Some(bone), Some(x), Some(y)) => groups[slot].1.push(Joint2d { bone, x, y }),
            _ => incomplete_2d += 1,
        }
    }

    if dropped_2d + dropped_3d > 0 {
        ut::track::progress_warn(&format!(
            "{}: skipped {} 2D and {} 3D rows with a null frame, camera, focal length or bone.",
            meta_2d.file_name, dropped_2d, dropped_3d
        ));
    }

    if incomplete_2d + incomplete_3d > 0 {
        ut::track::progress_warn(&format!(
            "{}: {} 2D and {} 3D rows had null coordinates and were left out of their pose.",
            meta_2d.file_name, incomplete_2d, incomplete_3d
        ));
    }

    groups.sort_by(|a, b| compare_groups(&a.0, &b.0));

    Ok(groups
        .into_iter()
        .map(|((frame, camera, focal_length), pose_2d)| Datapoint {
            subject: meta_2d.subject.clone(),
            file_name_2d: meta_2d.file_name.clone(),
            file_name_3d: meta_3d.file_name.clone(),
            action: meta_2d.action.clone(),
            camera,
            frame,
            focal_length,
            pose_2d,
            pose_3d: pose_3d_by_frame.get(&frame).cloned().unwrap_or_default(),
            joint_presence_mask: mask.clone(),
            image_path: None,
            image_bytes: None,
        })
        .collect())
}

#[cfg(test)]
mod test {

    use polars::prelude::*;

    use super::*;
    use crate::pose::BoneVocabulary;

    fn meta(file_name: &str) -> SourceMetadata {
        SourceMetadata::from_path(file_name)
    }

    fn table(df: DataFrame) -> PoseTable {
        PoseTable::from_dataframe("test.csv", df).unwrap()
    }

    fn table_2d(frames: &[i64], cameras: &[&str], focal: &[i64], bones: &[&str]) -> PoseTable {
        let xs: Vec<f64> = (0..frames.len()).map(|i| i as f64).collect();
        let ys: Vec<f64> = (0..frames.len()).map(|i| 10.0 * i as f64).collect();

        table(
            df!(
                "Frame" => frames,
                "Camera" => cameras,
                "Bone" => bones,
                "X" => xs,
                "Y" => ys,
                "Focal Length" => focal,
            )
            .unwrap(),
        )
    }

    fn table_3d(frames: &[i64], bones: &[&str], xs: &[f64]) -> PoseTable {
        let zeros = vec![0.0f64; frames.len()];

        table(
            df!(
                "Frame" => frames,
                "Bone" => bones,
                "X" => xs,
                "Y" => zeros.clone(),
                "Z" => zeros,
            )
            .unwrap(),
        )
    }

    fn merge_tables(t2d: &PoseTable, t3d: &PoseTable) -> Result<Vec<Datapoint>, PoseError> {
        merge(
            t2d,
            t3d,
            &meta("coordinates_2d_Akita_Albedo_Sit.csv"),
            &meta("coordinates_3d_Akita_Albedo_Sit.csv"),
            &PresenceMask::default(),
        )
    }

    fn row(frame: i64, bone: &str, x: f64, camera: Option<&str>) -> Row3d {
        Row3d {
            frame,
            bone: bone.to_string(),
            x: Some(x),
            y: Some(0.0),
            z: Some(0.0),
            camera: camera.map(str::to_string),
            focal_length: camera.map(|_| "50".to_string()),
        }
    }

    #[test]
    pub fn test_merge_example_scenario() {
        let vocabulary = BoneVocabulary::new(vec!["Head", "Spine", "Tail"]).unwrap();
        let t2d = table_2d(&[0, 0], &["A", "A"], &[50, 50], &["Head", "Tail"]);
        let t3d = table_3d(&[0, 0], &["Head", "Tail"], &[1.0, 2.0]);

        let mask = PresenceMask::generate(&vocabulary, &t2d.bones().unwrap());
        assert_eq!(mask.as_slice(), &[1, 0, 1]);

        let datapoints = merge(
            &t2d,
            &t3d,
            &meta("coordinates_2d_Akita_Albedo_Sit.csv"),
            &meta("coordinates_3d_Akita_Albedo_Sit.csv"),
            &mask,
        )
        .unwrap();

        assert_eq!(datapoints.len(), 1);

        let datapoint = &datapoints[0];
        assert_eq!(datapoint.subject.as_deref(), Some("Akita"));
        assert_eq!(datapoint.action.as_deref(), Some("Albedo_Sit"));
        assert_eq!(datapoint.camera, "A");
        assert_eq!(datapoint.frame, 0);
        assert_eq!(datapoint.focal_length, "50");
        assert_eq!(datapoint.pose_2d.len(), 2);
        assert_eq!(datapoint.pose_2d[0].bone, "Head");
        assert_eq!(datapoint.pose_3d.len(), 2);
        assert_eq!(datapoint.joint_presence_mask, mask);
        assert_eq!(datapoint.file_name_3d, "coordinates_3d_Akita_Albedo_Sit.csv");
    }

    #[test]
    pub fn test_merge_one_datapoint_per_triple() {
        let mut frames = vec![];
        let mut cameras = vec![];
        let mut focal = vec![];
        let mut bones = vec![];

        for frame in [0i64, 1] {
            for camera in ["A", "B"] {
                for focal_length in [35i64, 50] {
                    for bone in ["Head", "Tail"] {
                        frames.push(frame);
                        cameras.push(camera);
                        focal.push(focal_length);
                        bones.push(bone);
                    }
                }
            }
        }

        let t2d = table_2d(&frames, &cameras, &focal, &bones);
        let t3d = table_3d(&[0], &["Head"], &[1.0]);

        let datapoints = merge_tables(&t2d, &t3d).unwrap();
        assert_eq!(datapoints.len(), 8);

        let keys: HashSet<_> = datapoints.iter().map(|d| d.key()).collect();
        assert_eq!(keys.len(), 8);

        for datapoint in datapoints.iter() {
            assert_eq!(datapoint.pose_2d.len(), 2);
            let expected_3d = if datapoint.frame == 0 { 1 } else { 0 };
            assert_eq!(datapoint.pose_3d.len(), expected_3d);
        }
    }

    #[test]
    pub fn test_merge_sorted_by_frame_camera_focal() {
        let t2d = table_2d(
            &[1, 0, 0, 0],
            &["B", "B", "A", "A"],
            &[50, 50, 100, 35],
            &["Head", "Head", "Head", "Head"],
        );
        let t3d = table_3d(&[0], &["Head"], &[1.0]);

        let order: Vec<(i64, String, String)> = merge_tables(&t2d, &t3d)
            .unwrap()
            .into_iter()
            .map(|d| (d.frame, d.camera, d.focal_length))
            .collect();

        assert_eq!(
            order,
            vec![
                (0, "A".to_string(), "35".to_string()),
                (0, "A".to_string(), "100".to_string()),
                (0, "B".to_string(), "50".to_string()),
                (1, "B".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    pub fn test_merge_ignores_3d_only_frames() {
        let t2d = table_2d(&[0], &["A"], &[50], &["Head"]);
        let t3d = table_3d(&[0, 5, 6], &["Head", "Head", "Head"], &[1.0, 2.0, 3.0]);

        let datapoints = merge_tables(&t2d, &t3d).unwrap();
        assert_eq!(datapoints.len(), 1);
        assert_eq!(datapoints[0].frame, 0);
    }

    #[test]
    pub fn test_merge_dedups_3d_keep_first() {
        let t2d = table_2d(&[0, 0], &["A", "B"], &[50, 50], &["Head", "Head"]);
        let t3d = table_3d(&[0, 0, 0], &["Head", "Head", "Tail"], &[1.0, 9.0, 2.0]);

        let datapoints = merge_tables(&t2d, &t3d).unwrap();
        assert_eq!(datapoints.len(), 2);

        for datapoint in datapoints {
            assert_eq!(datapoint.pose_3d.len(), 2);
            assert_eq!(datapoint.pose_3d[0].bone, "Head");
            assert_eq!(datapoint.pose_3d[0].x, 1.0);
            assert_eq!(datapoint.pose_3d[1].bone, "Tail");
        }
    }

    #[test]
    pub fn test_merge_schema_errors() {
        let t2d = table_2d(&[0], &["A"], &[50], &["Head"]);
        let t3d = table_3d(&[0], &["Head"], &[1.0]);

        let no_focal = table(
            df!("frame" => [0i64], "camera" => ["A"], "bone" => ["Head"], "x" => [0.0], "y" => [0.0])
                .unwrap(),
        );
        let no_z = table(
            df!("frame" => [0i64], "bone" => ["Head"], "x" => [0.0], "y" => [0.0]).unwrap(),
        );

        assert!(matches!(
            merge_tables(&no_focal, &t3d),
            Err(PoseError::SchemaError(_))
        ));
        assert!(matches!(
            merge_tables(&t2d, &no_z),
            Err(PoseError::SchemaError(_))
        ));
    }

    #[test]
    pub fn test_merge_null_keys_dropped() {
        let t2d = table(
            df!(
                "frame" => [Some(0i64), None, Some(0)],
                "camera" => ["A", "A", "A"],
                "bone" => [Some("Head"), Some("Tail"), None],
                "x" => [1.0, 2.0, 3.0],
                "y" => [1.0, 2.0, 3.0],
                "focal length" => [50i64, 50, 50],
            )
            .unwrap(),
        );
        let t3d = table_3d(&[0], &["Head"], &[1.0]);

        let datapoints = merge_tables(&t2d, &t3d).unwrap();
        assert_eq!(datapoints.len(), 1);
        assert_eq!(datapoints[0].pose_2d.len(), 1);
    }

    #[test]
    pub fn test_dedup_first_unique_pairs() {
        let rows = vec![
            row(0, "Head", 1.0, Some("A")),
            row(0, "Tail", 2.0, Some("A")),
            row(0, "Head", 3.0, Some("B")),
            row(1, "Head", 4.0, Some("A")),
            row(0, "Tail", 5.0, Some("B")),
        ];

        let kept = dedup_first(rows);
        let pairs: HashSet<(i64, String)> = kept.iter().map(|r| (r.frame, r.bone.clone())).collect();

        assert_eq!(kept.len(), 3);
        assert_eq!(pairs.len(), kept.len());
        assert_eq!(
            kept.iter().map(|r| r.x.unwrap()).collect::<Vec<_>>(),
            vec![1.0, 2.0, 4.0]
        );
    }

    #[test]
    pub fn test_backfill_from_2d() {
        let t2d = table_2d(
            &[0, 0, 0],
            &["A", "B", "A"],
            &[50, 50, 50],
            &["Head", "Head", "Head"],
        );

        let rows = vec![row(0, "Head", 1.0, None), row(0, "Tail", 2.0, None)];
        let filled = backfill_render_keys(rows, &t2d).unwrap();

        // Head matches cameras A and B, Tail matches nothing
        assert_eq!(filled.len(), 3);
        assert_eq!(filled[0].camera.as_deref(), Some("A"));
        assert_eq!(filled[1].camera.as_deref(), Some("B"));
        assert_eq!(filled[2].camera, None);
        assert_eq!(filled[2].focal_length, None);

        let kept = dedup_first(filled);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].camera.as_deref(), Some("A"));
    }

    #[test]
    pub fn test_backfill_idempotent() {
        let t2d = table_2d(&[0, 0, 1], &["A", "B", "A"], &[50, 50, 35], &["Head", "Head", "Tail"]);

        let rows = vec![
            row(0, "Head", 1.0, None),
            row(1, "Tail", 2.0, None),
            row(2, "Head", 3.0, None),
            row(0, "Spine", 4.0, Some("C")),
        ];

        let once = backfill_render_keys(rows, &t2d).unwrap();
        let twice = backfill_render_keys(once.clone(), &t2d).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    pub fn test_compare_labels() {
        assert_eq!(compare_labels("35", "100"), Ordering::Less);
        assert_eq!(compare_labels("Cam_B", "Cam_A"), Ordering::Greater);
        assert_eq!(compare_labels("50", "50.0"), Ordering::Less);
    }

    #[test]
    pub fn test_merge_non_finite_coordinates_left_out() {
        let t2d = table(
            df!(
                "Frame" => [0i64, 0],
                "Camera" => ["A", "A"],
                "Bone" => ["Head", "Tail"],
                "X" => [1.0f64, f64::NAN],
                "Y" => [2.0f64, 3.0],
                "Focal Length" => [50i64, 50],
            )
            .unwrap(),
        );
        let t3d = table(
            df!(
                "Frame" => [0i64, 0],
                "Bone" => ["Head", "Tail"],
                "X" => [1.0f64, 2.0],
                "Y" => [1.0f64, 2.0],
                "Z" => [1.0f64, f64::INFINITY],
            )
            .unwrap(),
        );

        let datapoints = merge_tables(&t2d, &t3d).unwrap();
        assert_eq!(datapoints.len(), 1);
        assert_eq!(datapoints[0].pose_2d.len(), 1);
        assert_eq!(datapoints[0].pose_2d[0].bone, "Head");
        assert_eq!(datapoints[0].pose_3d.len(), 1);
        assert_eq!(datapoints[0].pose_3d[0].bone, "Head");

        let json = serde_json::to_string(&datapoints[0]).unwrap();
        let reloaded: Datapoint = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, datapoints[0]);
    }

    #[test]
    pub fn test_merge_3d_with_render_keys() {
        let t2d = table_2d(&[0, 0], &["A", "B"], &[50, 50], &["Head", "Head"]);
        let t3d = table(
            df!(
                "Frame" => [0i64, 0, 0],
                "Camera" => ["A", "B", "A"],
                "Bone" => ["Head", "Head", "Tail"],
                "X" => [1.0f64, 9.0, 2.0],
                "Y" => [0.0f64, 0.0, 0.0],
                "Z" => [0.0f64, 0.0, 0.0],
                "Focal Length" => [50i64, 50, 50],
            )
            .unwrap(),
        );

        let datapoints = merge_tables(&t2d, &t3d).unwrap();
        assert_eq!(datapoints.len(), 2);

        for datapoint in datapoints {
            assert_eq!(datapoint.pose_3d.len(), 2);
            assert_eq!(datapoint.pose_3d[0].bone, "Head");
            assert_eq!(datapoint.pose_3d[0].x, 1.0);
            assert_eq!(datapoint.pose_3d[1].bone, "Tail");
        }
    }

    #[test]
    pub fn test_merge_3d_with_camera_only() {
        let t2d = table_2d(&[0, 0], &["A", "B"], &[50, 35], &["Head", "Head"]);
        let t3d = table(
            df!(
                "Frame" => [0i64, 0],
                "Camera" => ["B", "A"],
                "Bone" => ["Head", "Head"],
                "X" => [9.0f64, 1.0],
                "Y" => [0.0f64, 0.0],
                "Z" => [0.0f64, 0.0],
            )
            .unwrap(),
        );

        let datapoints = merge_tables(&t2d, &t3d).unwrap();
        assert_eq!(datapoints.len(), 2);

        for datapoint in datapoints {
            assert_eq!(datapoint.pose_3d.len(), 1);
            assert_eq!(datapoint.pose_3d[0].x, 9.0);
        }
    }

    #[test]
    pub fn test_backfill_fills_missing_focal_length() {
        let t2d = table_2d(&[0, 0], &["A", "B"], &[50, 35], &["Head", "Head"]);

        let mut partial = row(0, "Head", 1.0, Some("B"));
        partial.focal_length = None;

        let filled = backfill_render_keys(vec![partial], &t2d).unwrap();
        assert_eq!(filled.len(), 1);
        assert_eq!(filled[0].camera.as_deref(), Some("B"));
        assert_eq!(filled[0].focal_length.as_deref(), Some("35"));

        let twice = backfill_render_keys(filled.clone(), &t2d).unwrap();
        assert_eq!(twice, filled);
    }
}
