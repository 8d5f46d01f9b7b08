//! Reads labelled data stored in the big-endian IDX format used by MNIST

use byteorder::{BigEndian, ReadBytesExt};
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::data::DataSet;
use crate::error::{NetworkError, Result};

const LABEL_MAGIC: i32 = 2049;
const IMAGE_MAGIC: i32 = 2051;

/// Struct for the data contained in an IDX file
#[derive(Debug, Clone, PartialEq)]
pub struct IdxFile {
    pub sizes: Vec<usize>,
    pub data: Vec<u8>,
}

impl IdxFile {
    /// Number of bytes in each item along the first dimension
    pub fn item_size(&self) -> usize {
        self.sizes.iter().skip(1).product()
    }
}

/// Reads an `IdxFile` of labels or images from `reader`
pub fn read_idx<R: Read>(reader: &mut R) -> Result<IdxFile> {
    let magic_number = reader.read_i32::<BigEndian>()?;
    let dimensions = match magic_number {
        LABEL_MAGIC => 1,
        IMAGE_MAGIC => 3,
        _ => return Err(NetworkError::InvalidData(format!("unknown IDX magic number {}", magic_number))),
    };

    let mut sizes: Vec<usize> = Vec::with_capacity(dimensions);
    for _ in 0..dimensions {
        let size = reader.read_i32::<BigEndian>()?;
        let size = usize::try_from(size)
            .map_err(|_| NetworkError::InvalidData(format!("negative IDX dimension {}", size)))?;
        sizes.push(size);
    }

    let expected = sizes.iter()
        .try_fold(1_usize, |total, &size| total.checked_mul(size))
        .ok_or_else(|| NetworkError::InvalidData("IDX dimensions overflow".to_string()))?;

    let mut data: Vec<u8> = Vec::new();
    reader.read_to_end(&mut data)?;
    if data.len() != expected {
        return Err(NetworkError::InvalidData(format!(
            "IDX header describes {} bytes but {} follow", expected, data.len(),
        )));
    }

    //Return
    Ok(IdxFile {
        sizes,
        data,
    })
}

/// Pairs an image file with a label file, scaling pixels to `[0, 1]` and one-hot encoding labels
pub fn read_labelled<L: Read, I: Read>(labels: &mut L, images: &mut I, classes: usize) -> Result<DataSet> {
    let label_data = read_idx(labels)?;
    let image_data = read_idx(images)?;
    if label_data.sizes.len() != 1 || image_data.sizes.len() != 3 {
        return Err(NetworkError::InvalidData("expected a label file and an image file".to_string()));
    }
    NetworkError::check_dimension("IDX image count", label_data.sizes[0], image_data.sizes[0])?;

    let image_shape = image_data.item_size();
    if image_shape == 0 {
        return Err(NetworkError::InvalidData("IDX images have no pixels".to_string()));
    }
    let mut dataset = DataSet::new();
    for (image, &class) in image_data.data.chunks_exact(image_shape).zip(&label_data.data) {
        let class = usize::from(class);
        if class >= classes {
            return Err(NetworkError::InvalidData(format!("label {} outside {} classes", class, classes)));
        }
        let pixels: Vec<f64> = image.iter().map(|&x| f64::from(x) / 255.).collect();
        let mut classification = vec![0.0; classes];
        classification[class] = 1.0;
        dataset.push(&pixels, &classification);
    }
    debug!("Read {} labelled images of {} pixels", dataset.len(), image_shape);

    //Return
    Ok(dataset)
}

/// Loads `{directory}/{name}-labels-idx1-ubyte` and `{directory}/{name}-images-idx3-ubyte`
pub fn load_data(directory: &Path, dataset_name: &str, classes: usize) -> Result<DataSet> {
    let label_file = File::open(directory.join(format!("{}-labels-idx1-ubyte", dataset_name)))?;
    let image_file = File::open(directory.join(format!("{}-images-idx3-ubyte", dataset_name)))?;
    read_labelled(&mut BufReader::new(label_file), &mut BufReader::new(image_file), classes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::Cursor;

    fn header(magic: i32, sizes: &[i32]) -> Vec<u8> {
        let mut bytes: Vec<u8> = Vec::new();
        bytes.write_i32::<BigEndian>(magic).unwrap();
        for &size in sizes {
            bytes.write_i32::<BigEndian>(size).unwrap();
        }
        bytes
    }

    #[test]
    fn reads_images_with_labels() {
        let mut labels = header(LABEL_MAGIC, &[2]);
        labels.extend_from_slice(&[1, 0]);
        let mut images = header(IMAGE_MAGIC, &[2, 1, 2]);
        images.extend_from_slice(&[0, 255, 51, 0]);

        let dataset = read_labelled(&mut Cursor::new(labels), &mut Cursor::new(images), 3).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.inputs()[0], vec![0.0, 1.0]);
        assert_eq!(dataset.inputs()[1], vec![0.2, 0.0]);
        assert_eq!(dataset.labels()[0], vec![0.0, 1.0, 0.0]);
        assert_eq!(dataset.labels()[1], vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn rejects_unknown_magic() {
        let bytes = header(1234, &[]);
        assert!(matches!(read_idx(&mut Cursor::new(bytes)), Err(NetworkError::InvalidData(_))));
    }

    #[test]
    fn rejects_truncated_body() {
        let mut bytes = header(LABEL_MAGIC, &[3]);
        bytes.push(0);
        assert!(matches!(read_idx(&mut Cursor::new(bytes)), Err(NetworkError::InvalidData(_))));
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        let bytes = header(IMAGE_MAGIC, &[i32::MAX, i32::MAX, i32::MAX]);
        let err = read_idx(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidData(ref message) if message.contains("overflow")));
    }

    #[test]
    fn rejects_images_without_pixels() {
        let mut labels = header(LABEL_MAGIC, &[2]);
        labels.extend_from_slice(&[0, 1]);
        let images = header(IMAGE_MAGIC, &[2, 0, 0]);
        let err = read_labelled(&mut Cursor::new(labels), &mut Cursor::new(images), 2).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidData(_)));
    }

    #[test]
    fn rejects_label_outside_classes() {
        let mut labels = header(LABEL_MAGIC, &[1]);
        labels.push(9);
        let mut images = header(IMAGE_MAGIC, &[1, 1, 1]);
        images.push(0);
        let err = read_labelled(&mut Cursor::new(labels), &mut Cursor::new(images), 2).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidData(_)));
    }
}
