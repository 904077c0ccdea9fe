use camino::Utf8PathBuf;
use tempfile::TempDir;

/// Small S-PLUS-like footprint used across integration tests (RA in hours).
pub const TILES_CSV: &str = "\
NAME,RA,DEC,STATUS
SPLUS-s01s01,0.0,-1.0,1
SPLUS-s01s02,0.1,-1.0,2
SPLUS-n10n05,10.0,0.0,1
SPLUS-n10n06,10.0,0.001,2
SPLUS-s20s30,20.0,-30.0,3
";

/// Write `content` to `name` inside `dir` and return its UTF-8 path.
pub fn write_file(dir: &TempDir, name: &str, content: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf-8 temp path");
    std::fs::write(&path, content).expect("write test file");
    path
}

/// A temp directory holding `tiles.csv` with [`TILES_CSV`].
pub fn catalog_dir() -> (TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_file(&dir, "tiles.csv", TILES_CSV);
    (dir, path)
}
