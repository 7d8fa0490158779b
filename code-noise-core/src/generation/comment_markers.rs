use serde::{Deserialize, Serialize};

/// Family of comment syntax, selecting the collision guards applied
/// before a comment is written.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommentMarkerType {
	/// `//` and `/* */` style: a preceding `/` is separated by one whitespace.
	CSharpStyle,
	/// Keyword style (`REM`): the marker is always preceded by whitespace.
	RemarkText,
	/// No collision guard.
	Other,
}

/// Comment syntax of the language under test.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CommentMarkers {
	pub line_comment_marker: String,
	pub multiline_comment_start_marker: String,
	pub multiline_comment_end_marker: String,
	pub marker_type: CommentMarkerType,
}

impl CommentMarkers {
	pub fn new(
		line: &str,
		multiline_start: &str,
		multiline_end: &str,
		marker_type: CommentMarkerType,
	) -> Self {
		Self {
			line_comment_marker: line.to_owned(),
			multiline_comment_start_marker: multiline_start.to_owned(),
			multiline_comment_end_marker: multiline_end.to_owned(),
			marker_type,
		}
	}

	/// `//`, `/*` and `*/`.
	pub fn c_sharp() -> Self {
		Self::new("//", "/*", "*/", CommentMarkerType::CSharpStyle)
	}

	/// Returns the name of the first empty marker, if any.
	pub(crate) fn first_empty_marker(&self) -> Option<&'static str> {
		if self.line_comment_marker.is_empty() {
			Some("line_comment_marker")
		} else if self.multiline_comment_start_marker.is_empty() {
			Some("multiline_comment_start_marker")
		} else if self.multiline_comment_end_marker.is_empty() {
			Some("multiline_comment_end_marker")
		} else {
			None
		}
	}
}

/// Where a generated comment landed in the buffer.
///
/// `position` and `length` are byte offsets, so
/// `&buffer[position..position + length]` is the comment text: markers and
/// body, without collision-guard whitespace or the trailing line terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommentedTextData {
	pub position: usize,
	pub length: usize,
	pub is_line_comment: bool,
}
