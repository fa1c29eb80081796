//! Reading and writing the per-image features files.
//!
//! A features file starts with the number of features on its own line, followed by one feature
//! per line with its coordinates separated by single spaces:
//!
//! ```text
//! 2
//! 1.000000 2.500000 -3.000000
//! 0.000000 4.000000 8.125000
//! ```

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, warn};

use crate::error::{invalid_argument, FeatureIndexError, Result};
use crate::point::Point;

/// Features reserved before reading, whatever count the file declares.
const MAX_PREALLOCATED_FEATURES: usize = 4096;

/// Write `features` in the features file format.
///
/// Fails if `features` is empty.
pub fn write_features<W: Write>(writer: &mut W, features: &[Point<f64>]) -> Result<()> {
    if features.is_empty() {
        return invalid_argument("cannot write an empty feature list");
    }
    writeln!(writer, "{}", features.len())?;
    for feature in features {
        let mut coords = feature.coords().iter();
        if let Some(first) = coords.next() {
            write!(writer, "{:.6}", first)?;
        }
        for coord in coords {
            write!(writer, " {:.6}", coord)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Write `features` to the file at `path`, replacing any existing file.
///
/// If writing fails part way, the partial file is removed.
pub fn save_features<P: AsRef<Path>>(path: P, features: &[Point<f64>]) -> Result<()> {
    let path = path.as_ref();
    if features.is_empty() {
        return invalid_argument("cannot save an empty feature list");
    }

    let result = File::create(path).map_err(FeatureIndexError::from).and_then(|file| {
        let mut writer = BufWriter::new(file);
        write_features(&mut writer, features)?;
        writer.flush()?;
        Ok(())
    });

    match result {
        Ok(()) => {
            debug!("saved {} features to {}", features.len(), path.display());
            Ok(())
        }
        Err(err) => {
            warn!("failed to save features to {}: {}", path.display(), err);
            if path.exists() {
                if let Err(remove_err) = fs::remove_file(path) {
                    warn!("could not remove {}: {}", path.display(), remove_err);
                }
            }
            Err(err)
        }
    }
}

/// Read a features file, tagging every feature with `image_index`.
///
/// Every feature must have exactly `dimension` coordinates.
pub fn read_features<R: BufRead>(
    reader: R,
    image_index: usize,
    dimension: usize,
) -> Result<Vec<Point<f64>>> {
    if dimension == 0 {
        return invalid_argument("feature dimension must be positive");
    }
    let mut lines = reader.lines();

    let count = match lines.next() {
        Some(line) => parse_count(&line?)?,
        None => return malformed("missing feature count"),
    };

    // the count is untrusted until that many lines were read
    let mut features = Vec::new();
    features.try_reserve_exact(count.min(MAX_PREALLOCATED_FEATURES))?;
    for i in 0..count {
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                return malformed(format!("expected {} features, found {}", count, i));
            }
        };
        let coords = parse_feature(&line, i, dimension)?;
        features.push(Point::try_new(coords, image_index)?);
    }
    Ok(features)
}

/// Read the features file at `path`. See [`read_features`].
pub fn load_features<P: AsRef<Path>>(
    path: P,
    image_index: usize,
    dimension: usize,
) -> Result<Vec<Point<f64>>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let features = read_features(BufReader::new(file), image_index, dimension)?;
    debug!(
        "loaded {} features of image {} from {}",
        features.len(),
        image_index,
        path.display()
    );
    Ok(features)
}

/// Load the features of every image, where image `i` is stored at `paths[i]`.
///
/// Stops at the first file that cannot be loaded.
pub fn load_all_features<P: AsRef<Path>>(paths: &[P], dimension: usize) -> Result<Vec<Point<f64>>> {
    let mut all = Vec::new();
    for (image_index, path) in paths.iter().enumerate() {
        let features = load_features(path, image_index, dimension)?;
        all.try_reserve(features.len())?;
        all.extend(features);
    }
    debug!("loaded {} features of {} images", all.len(), paths.len());
    Ok(all)
}

fn malformed<T>(msg: impl Into<String>) -> Result<T> {
    Err(FeatureIndexError::MalformedFeatures(msg.into()))
}

fn parse_count(line: &str) -> Result<usize> {
    match line.trim().parse::<usize>() {
        Ok(0) => malformed("feature count must be positive"),
        Ok(count) => Ok(count),
        Err(_) => malformed(format!("invalid feature count {:?}", line.trim())),
    }
}

fn parse_feature(line: &str, feature: usize, dimension: usize) -> Result<Vec<f64>> {
    let mut coords = Vec::with_capacity(dimension);
    for token in line.split_whitespace() {
        match token.parse::<f64>() {
            Ok(value) => coords.push(value),
            Err(_) => {
                return malformed(format!(
                    "feature {}: invalid coordinate {:?}",
                    feature, token
                ))
            }
        }
    }
    if coords.len() != dimension {
        return malformed(format!(
            "feature {}: expected {} coordinates, found {}",
            feature,
            dimension,
            coords.len()
        ));
    }
    Ok(coords)
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, ErrorKind};

    use super::*;

    fn features(image_index: usize) -> Vec<Point<f64>> {
        vec![
            Point::try_new([1., 2.5, -3.], image_index).unwrap(),
            Point::try_new([0., 4., 8.125], image_index).unwrap(),
        ]
    }

    fn read(text: &str) -> Result<Vec<Point<f64>>> {
        read_features(Cursor::new(text), 0, 3)
    }

    #[test]
    fn writes_six_decimals() {
        let mut out = Vec::new();
        write_features(&mut out, &features(0)).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2\n1.000000 2.500000 -3.000000\n0.000000 4.000000 8.125000\n"
        );
    }

    #[test]
    fn write_then_read() {
        let mut out = Vec::new();
        write_features(&mut out, &features(0)).unwrap();
        let read = read_features(Cursor::new(out), 4, 3).unwrap();
        assert_eq!(read, features(4));
    }

    #[test]
    fn rejects_empty_feature_list() {
        let mut out = Vec::new();
        assert!(matches!(
            write_features(&mut out, &[]),
            Err(FeatureIndexError::InvalidArgument(_))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn tolerates_extra_whitespace() {
        let read = read(" 1 \n  1.5   2\t3 \n").unwrap();
        assert_eq!(read[0].coords(), &[1.5, 2., 3.]);
    }

    #[test]
    fn rejects_malformed_content() {
        for text in [
            "",
            "0\n",
            "-1\n1 2 3\n",
            "two\n1 2 3\n",
            "2\n1 2 3\n",
            "1\n1 2\n",
            "1\n1 2 3 4\n",
            "1\n1 x 3\n",
            "999999999999999\n1 2 3\n",
            "18446744073709551615\n1 2 3\n",
        ] {
            assert!(
                matches!(read(text), Err(FeatureIndexError::MalformedFeatures(_))),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img0.feats");
        save_features(&path, &features(0)).unwrap();
        assert_eq!(load_features(&path, 0, 3).unwrap(), features(0));
    }

    #[test]
    fn failed_save_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("img0.feats");
        assert!(matches!(
            save_features(&path, &features(0)),
            Err(FeatureIndexError::Io(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        match load_features(dir.path().join("nope.feats"), 0, 3) {
            Err(FeatureIndexError::Io(err)) => assert_eq!(err.kind(), ErrorKind::NotFound),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn loads_every_image() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<_> = (0..3)
            .map(|i| dir.path().join(format!("img{}.feats", i)))
            .collect();
        for (i, path) in paths.iter().enumerate() {
            save_features(path, &features(i)).unwrap();
        }

        let all = load_all_features(&paths, 3).unwrap();
        assert_eq!(all.len(), 6);
        let indices: Vec<_> = all.iter().map(|p| p.index()).collect();
        assert_eq!(indices, vec![0, 0, 1, 1, 2, 2]);

        fs::remove_file(&paths[1]).unwrap();
        assert!(load_all_features(&paths, 3).is_err());
    }

    #[test]
    fn short_file_reports_declared_count() {
        match read("999999999999999\n1 2 3\n") {
            Err(FeatureIndexError::MalformedFeatures(msg)) => {
                assert_eq!(msg, "expected 999999999999999 features, found 1")
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
