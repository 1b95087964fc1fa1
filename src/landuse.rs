//! ASCDATA.CFG: where the simulator finds its land use and roughness length
//! files.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// File name the simulator expects in its working directory
pub const LANDUSE_FILE: &str = "ASCDATA.CFG";

/// The six lines of ASCDATA.CFG for a global one degree land use grid stored
/// under `landuse_dir/bdyfiles/`
///
/// ```
/// let lines = hycs::landuse_lines("/opt/hysplit");
/// assert_eq!(lines[0], "-90.0  -180.0 ");
/// assert_eq!(lines[5], "/opt/hysplit/bdyfiles/ ");
/// ```
pub fn landuse_lines(landuse_dir: &str) -> [String; 6] {
    [
        String::from("-90.0  -180.0 "),
        String::from("1.0    1.0    "),
        String::from("180    360    "),
        String::from("2 "),
        String::from("0.2 "),
        format!("{}/bdyfiles/ ", landuse_dir),
    ]
}

/// Write ASCDATA.CFG lines to any sink
pub fn write_landuse<W: Write>(landuse_dir: &str, mut writer: W) -> io::Result<()> {
    for line in &landuse_lines(landuse_dir) {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Write ASCDATA.CFG into `outdir`
pub fn write_landuse_file<P: AsRef<Path>>(landuse_dir: &str, outdir: P) -> io::Result<()> {
    let path = outdir.as_ref().join(LANDUSE_FILE);
    log::debug!("writing {}", path.display());
    let file = File::create(&path)?;
    write_landuse(landuse_dir, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_landuse() {
        let mut out = Vec::new();
        write_landuse("/hysplit", &mut out).unwrap();
        let expected = "-90.0  -180.0 \n1.0    1.0    \n180    360    \n2 \n0.2 \n/hysplit/bdyfiles/ \n";
        assert_eq!(std::str::from_utf8(&out).unwrap(), expected);
    }

    #[test]
    fn test_write_landuse_file() {
        let dir = std::env::temp_dir().join(format!("hycs-landuse-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        write_landuse_file("/hysplit", &dir).unwrap();
        let written = std::fs::read_to_string(dir.join(LANDUSE_FILE)).unwrap();
        assert_eq!(written.lines().count(), 6);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
