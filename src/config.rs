use crate::prelude::*;

use std::{io::ErrorKind, path::Path};

fn read_lines(path: &Path) -> Result<Vec<String>, Error> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(contents.lines().map(str::to_string).collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound(path.to_path_buf())),
        Err(source) => Err(Error::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Six lines, one face each in [`Face::ORDER`], of whitespace separated colours.
///
/// A malformed file still has whatever faces were read printed before the
/// error is returned.
pub fn load_faces(path: &Path) -> Result<Cube, Error> {
    let lines = read_lines(path)?;
    log::debug!("Read {} face lines from {}", lines.len(), path.display());
    Cube::from_rows(&lines).map_err(|e| {
        print!("{}", listing(&lines));
        e
    })
}

/// One `U: a b c ..` line per face that was read; extra lines are dropped.
pub fn listing(lines: &[String]) -> String {
    Face::ORDER
        .iter()
        .zip(lines)
        .map(|(face, line)| {
            let tokens = line.split_whitespace().collect::<Vec<_>>();
            format!("{}: {}\n", face, tokens.join(" "))
        })
        .collect()
}

/// All lines concatenated into one facelet stream.
pub fn load_stream(path: &Path) -> Result<Cube, Error> {
    let stream = read_lines(path)?.concat();
    Cube::from_stream(&stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cubesearch-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    const SOLVED: &str = "U U U U U U U U U
F F F F F F F F F
L L L L L L L L L
R R R R R R R R R
D D D D D D D D D
B B B B B B B B B
";

    #[test]
    fn loads_face_file() {
        let path = write_temp("faces.txt", SOLVED);
        let loaded = load_faces(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), Cube::solved(3));
    }

    #[test]
    fn five_lines_is_format_error() {
        let five = SOLVED.lines().take(5).collect::<Vec<_>>().join("\n");
        let path = write_temp("five.txt", &five);
        let loaded = load_faces(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(loaded, Err(Error::Format(_))));
    }

    #[test]
    fn listing_shows_the_faces_that_were_read() {
        let lines = vec!["W  W W".to_string(), "G G".to_string()];
        assert_eq!(listing(&lines), "U: W W W\nF: G G\n");

        let seven = vec![String::new(); 7];
        assert_eq!(listing(&seven).lines().count(), 6);
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = std::env::temp_dir().join("cubesearch-does-not-exist.txt");
        assert!(matches!(load_faces(&path), Err(Error::NotFound(p)) if p == path));
    }

    #[test]
    fn loads_stream_file() {
        let encoding = cube_with_moves("row1 col0'").encoding();
        let (first, rest) = encoding.split_at(27);
        let path = write_temp("stream.txt", &format!("{}\n{}\n", first, rest));
        let loaded = load_stream(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), cube_with_moves("row1 col0'"));
    }
}
