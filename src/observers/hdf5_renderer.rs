use std::path::Path;

use crate::{Error, SimulationParameters};
use crate::observers::Renderer;

/// How frames should be saved to file.
#[derive(Debug)]
pub struct SaveSettings<P: AsRef<Path>> {
    /// The path to the save file.
    pub filename: P,
    /// What information to save.
    pub save_type: SaveType,
    /// Whether or not to overwrite any possible saved data.
    pub overwrite: bool,
}

/// Represents what data to save.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum SaveType {
    /// Save Ez for every point on the grid.
    Full,
    /// Save Ez only along the x line through the center cell.
    Centerline,
}

/// Writes Ez frames into resizable HDF5 datasets for offline plotting.
///
/// Layout:
/// - `frames`: `(k, ny, nx)` for `SaveType::Full`, `(k, nx)` for `SaveType::Centerline`
/// - `steps`: `(k,)` step index of each frame
/// - `final`: `(ny, nx)` field after the last step of a run
/// - attributes `time_step`, `dx`, `dy`
pub struct Hdf5Renderer {
    file: hdf5::File,
    save_type: SaveType,
    nframes: usize,
}

impl Hdf5Renderer {
    /// Opens or creates the save file for an `(nx, ny)` grid.
    pub fn new<P: AsRef<Path>>(
        settings: SaveSettings<P>,
        shape: (usize, usize),
        sim_params: &SimulationParameters,
    ) -> Result<Self, Error> {
        let (nx, ny) = shape;
        let frame_shape = match settings.save_type {
            SaveType::Full => vec![ny, nx],
            SaveType::Centerline => vec![nx],
        };

        let filename = settings.filename.as_ref();
        if filename.exists() && !settings.overwrite {
            let file = hdf5::File::append(filename)?;

            let existing = file.dataset("frames")?.shape();
            if existing[1..] != frame_shape[..] {
                return Err(Error::BadConfig(format!(
                    "{} holds frames of shape {:?}, expected {:?}",
                    filename.display(), &existing[1..], frame_shape,
                )));
            }

            return Ok(Self {
                file,
                save_type: settings.save_type,
                nframes: existing[0],
            });
        }

        let file = hdf5::File::create(filename)?;

        // frames are appended one at a time
        match settings.save_type {
            SaveType::Full => file.new_dataset::<f64>()
                .shape((hdf5::Extent::resizable(0), ny, nx))
                .chunk((1, ny, nx))
                .create("frames")?,
            SaveType::Centerline => file.new_dataset::<f64>()
                .shape((hdf5::Extent::resizable(0), nx))
                .chunk((1, nx))
                .create("frames")?,
        };
        file.new_dataset::<u64>()
            .shape(hdf5::Extent::resizable(0))
            .chunk(64)
            .create("steps")?;

        // save deltas as file attributes
        for (name, value) in [
            ("time_step", sim_params.delta_t),
            ("dx", sim_params.delta_x),
            ("dy", sim_params.delta_y),
        ] {
            file.new_attr::<f64>()
                .shape(hdf5::Extents::Scalar)
                .create(name)?
                .write_scalar(&value)?;
        }

        Ok(Self {
            file,
            save_type: settings.save_type,
            nframes: 0,
        })
    }

    /// Frames written so far, including any found in an appended file.
    #[inline]
    pub fn nframes(&self) -> usize {
        self.nframes
    }
}

impl Renderer for Hdf5Renderer {
    fn on_frame(&mut self, step: usize, frame: ndarray::ArrayView2<f64>) -> Result<(), Error> {
        let index = self.nframes;

        let frames = self.file.dataset("frames")?;
        match self.save_type {
            SaveType::Full => {
                frames.resize((index + 1, frame.nrows(), frame.ncols()))?;
                frames.write_slice(
                    frame.as_standard_layout().view(),
                    ndarray::s![index, .., ..],
                )?;
            }
            SaveType::Centerline => {
                let center_row = frame.nrows() / 2;
                frames.resize((index + 1, frame.ncols()))?;
                frames.write_slice(
                    frame.row(center_row).to_owned().view(),
                    ndarray::s![index, ..],
                )?;
            }
        }

        let steps = self.file.dataset("steps")?;
        steps.resize(index + 1)?;
        steps.write_slice(
            ndarray::arr1(&[step as u64]).view(),
            ndarray::s![index..(index + 1)],
        )?;

        self.nframes += 1;
        Ok(())
    }

    fn finish(&mut self, _step: usize, frame: ndarray::ArrayView2<f64>) -> Result<(), Error> {
        let dataset = match self.file.dataset("final") {
            Ok(dataset) => dataset,
            Err(_) => self.file.new_dataset::<f64>()
                .shape(frame.dim())
                .create("final")?,
        };
        dataset.write(frame.as_standard_layout().view())?;
        self.file.flush()?;

        Ok(())
    }
}
