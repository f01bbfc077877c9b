//! Paginated access to the process log file.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

/// One page of log lines plus paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogPage {
    pub logs: Vec<String>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub lines_per_page: usize,
    pub total_lines: usize,
    pub total_pages: usize,
}

/// Read one page of log lines, newest line of the page first.
///
/// The page window is applied in file order and then reversed for
/// display. A missing log file reads as an empty page, not an error.
/// `lines_per_page` and `page` must both be at least 1.
pub fn read_page(path: &Path, lines_per_page: usize, page: usize) -> io::Result<LogPage> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(LogPage {
                logs: Vec::new(),
                pagination: Pagination {
                    page: 1,
                    lines_per_page,
                    total_lines: 0,
                    total_pages: 0,
                },
            });
        }
        Err(err) => return Err(err),
    };

    let skip = (page - 1) * lines_per_page;
    let mut total_lines = 0;
    let mut logs = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if total_lines >= skip && logs.len() < lines_per_page {
            logs.push(line);
        }
        total_lines += 1;
    }
    logs.reverse();

    Ok(LogPage {
        logs,
        pagination: Pagination {
            page,
            lines_per_page,
            total_lines,
            total_pages: total_lines.div_ceil(lines_per_page),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn log_file(dir: &TempDir, lines: &[&str]) -> std::path::PathBuf {
        let path = dir.path().join("partsdash.log");
        fs::write(&path, lines.join("\n") + "\n").unwrap();
        path
    }

    #[test]
    fn pages_are_windows_in_file_order_reversed_for_display() {
        let dir = TempDir::new().unwrap();
        let path = log_file(&dir, &["one", "two", "three", "four", "five"]);

        let first = read_page(&path, 2, 1).unwrap();
        assert_eq!(first.logs, vec!["two", "one"]);
        assert_eq!(first.pagination.total_lines, 5);
        assert_eq!(first.pagination.total_pages, 3);

        let last = read_page(&path, 2, 3).unwrap();
        assert_eq!(last.logs, vec!["five"]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = log_file(&dir, &["only"]);

        let page = read_page(&path, 10, 2).unwrap();
        assert!(page.logs.is_empty());
        assert_eq!(page.pagination.total_lines, 1);
    }

    #[test]
    fn missing_log_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let page = read_page(&dir.path().join("absent.log"), 100, 1).unwrap();
        assert!(page.logs.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
    }
}
