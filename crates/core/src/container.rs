//! H5J container metadata
//!
//! An H5J volumetric image container is an HDF5 file whose root `Channels`
//! group carries the volume bounding box as integer attributes. Only the
//! three dimension attributes are read here; datasets are never touched, so
//! opening even a very large container is cheap.

use std::path::Path;

/// Name of the attribute group holding the volume dimensions.
const CHANNELS_GROUP: &str = "Channels";

/// Errors that can occur while reading container metadata
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// The container file could not be opened
    #[error("failed to open container '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: hdf5::Error,
    },

    /// The container has no `Channels` group
    #[error("container has no 'Channels' group: {0}")]
    MissingChannels(#[source] hdf5::Error),

    /// A dimension attribute exists but could not be read
    #[error("failed to read attribute '{name}': {source}")]
    Attribute {
        name: String,
        #[source]
        source: hdf5::Error,
    },
}

/// Volume bounding box in voxels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VolumeBbox {
    pub width: i64,
    pub height: i64,
    pub frames: i64,
}

/// Read the bounding box of an H5J container.
///
/// The file is opened read-only. Each dimension attribute defaults to 0 when
/// absent; attributes stored as length-1 arrays rather than scalars are
/// unwrapped to their single element.
pub fn read_volume_bbox<P: AsRef<Path>>(path: P) -> Result<VolumeBbox, ContainerError> {
    let path = path.as_ref();

    let file = hdf5::File::open(path).map_err(|source| ContainerError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let channels = file
        .group(CHANNELS_GROUP)
        .map_err(ContainerError::MissingChannels)?;

    let bbox = VolumeBbox {
        width: read_int_attr(&channels, "width")?,
        height: read_int_attr(&channels, "height")?,
        frames: read_int_attr(&channels, "frames")?,
    };

    log::debug!(
        "read bounding box {}x{}x{} from {}",
        bbox.width,
        bbox.height,
        bbox.frames,
        path.display()
    );

    Ok(bbox)
}

/// Read an integer attribute, defaulting to 0 when the attribute is absent.
fn read_int_attr(group: &hdf5::Group, name: &str) -> Result<i64, ContainerError> {
    let Ok(attr) = group.attr(name) else {
        return Ok(0);
    };

    let attribute_error = |source| ContainerError::Attribute {
        name: name.to_owned(),
        source,
    };

    if attr.ndim() == 0 {
        return attr.read_scalar::<i64>().map_err(attribute_error);
    }

    // Some writers store dimensions as length-1 arrays instead of scalars.
    let values = attr.read_raw::<i64>().map_err(attribute_error)?;
    Ok(values.first().copied().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn create_container(dir: &Path, name: &str) -> (hdf5::File, PathBuf) {
        let path = dir.join(name);
        let file = hdf5::File::create(&path).unwrap();
        (file, path)
    }

    #[test]
    fn reads_scalar_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let (file, path) = create_container(dir.path(), "scalar.h5j");

        let channels = file.create_group(CHANNELS_GROUP).unwrap();
        channels
            .new_attr::<i64>()
            .create("width")
            .unwrap()
            .write_scalar(&10)
            .unwrap();
        channels
            .new_attr::<i64>()
            .create("height")
            .unwrap()
            .write_scalar(&20)
            .unwrap();
        channels
            .new_attr::<i64>()
            .create("frames")
            .unwrap()
            .write_scalar(&3)
            .unwrap();
        drop(file);

        let bbox = read_volume_bbox(&path).unwrap();
        assert_eq!(
            bbox,
            VolumeBbox {
                width: 10,
                height: 20,
                frames: 3
            }
        );
    }

    #[test]
    fn unwraps_length_one_array_attributes() {
        let dir = tempfile::tempdir().unwrap();
        let (file, path) = create_container(dir.path(), "arrays.h5j");

        let channels = file.create_group(CHANNELS_GROUP).unwrap();
        for (name, value) in [("width", 640i64), ("height", 480), ("frames", 12)] {
            channels
                .new_attr::<i64>()
                .shape(1)
                .create(name)
                .unwrap()
                .write_raw(&[value])
                .unwrap();
        }
        drop(file);

        let bbox = read_volume_bbox(&path).unwrap();
        assert_eq!(
            bbox,
            VolumeBbox {
                width: 640,
                height: 480,
                frames: 12
            }
        );
    }

    #[test]
    fn missing_attributes_default_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let (file, path) = create_container(dir.path(), "partial.h5j");

        let channels = file.create_group(CHANNELS_GROUP).unwrap();
        channels
            .new_attr::<i64>()
            .create("width")
            .unwrap()
            .write_scalar(&7)
            .unwrap();
        drop(file);

        let bbox = read_volume_bbox(&path).unwrap();
        assert_eq!(
            bbox,
            VolumeBbox {
                width: 7,
                height: 0,
                frames: 0
            }
        );
    }

    #[test]
    fn missing_channels_group_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (file, path) = create_container(dir.path(), "empty.h5j");
        drop(file);

        let result = read_volume_bbox(&path);
        assert!(matches!(result, Err(ContainerError::MissingChannels(_))));
    }

    #[test]
    fn unreadable_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.h5j");
        std::fs::write(&path, b"not an hdf5 file").unwrap();

        let result = read_volume_bbox(&path);
        assert!(matches!(result, Err(ContainerError::Open { .. })));
    }
}
