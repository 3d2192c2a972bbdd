use std::fs::File;
use std::io::{self, Read};
use std::iter::Peekable;
use std::path::Path;
use std::vec::IntoIter;

/// A finite, ordered stream of corpus characters.
///
/// The whole source is loaded up front, then handed out one character
/// (Unicode scalar value) at a time.
#[derive(Debug)]
pub struct CorpusReader {
	chars: Peekable<IntoIter<char>>,
}

impl CorpusReader {
	/// Opens a corpus file.
	///
	/// # Errors
	/// Returns an I/O error if the file does not exist, cannot be read,
	/// or is not valid UTF-8.
	pub fn open<P: AsRef<Path>>(filename: P) -> io::Result<Self> {
		let mut contents = String::new();
		File::open(filename)?.read_to_string(&mut contents)?;
		Ok(Self::from_text(&contents))
	}

	/// Builds a reader over an in-memory text.
	pub fn from_text(text: &str) -> Self {
		Self {
			chars: text.chars().collect::<Vec<_>>().into_iter().peekable(),
		}
	}

	/// Returns `true` while at least one character remains.
	pub fn has_more(&mut self) -> bool {
		self.chars.peek().is_some()
	}

	/// Reads the next character, or `None` once the corpus is exhausted.
	pub fn read_char(&mut self) -> Option<char> {
		self.chars.next()
	}
}

impl Iterator for CorpusReader {
	type Item = char;

	fn next(&mut self) -> Option<char> {
		self.read_char()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_characters_in_order() {
		let mut reader = CorpusReader::from_text("hé!");
		assert!(reader.has_more());
		assert_eq!(reader.read_char(), Some('h'));
		assert_eq!(reader.read_char(), Some('é'));
		assert_eq!(reader.read_char(), Some('!'));
		assert!(!reader.has_more());
		assert_eq!(reader.read_char(), None);
	}

	#[test]
	fn empty_text_has_nothing() {
		let mut reader = CorpusReader::from_text("");
		assert!(!reader.has_more());
		assert_eq!(reader.count(), 0);
	}

	#[test]
	fn open_missing_file_fails() {
		let err = CorpusReader::open("./definitely/not/here.txt").unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}

	#[test]
	fn open_reads_file_contents() {
		let path = std::env::temp_dir().join(format!("markov-gen-io-{}.txt", std::process::id()));
		std::fs::write(&path, "abc\nd").unwrap();

		let chars: String = CorpusReader::open(&path).unwrap().collect();
		std::fs::remove_file(&path).unwrap();

		assert_eq!(chars, "abc\nd");
	}
}
