use std::ops::BitOr;

/// Set of whitespace characters eligible at a call site.
///
/// `NEW_LINE` is excluded for line-comment bodies, for example.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct WhitespaceFlags(u8);

impl WhitespaceFlags {
	pub const NONE: Self = Self(0);
	pub const SPACE: Self = Self(1);
	pub const TAB: Self = Self(2);
	pub const NEW_LINE: Self = Self(4);
	pub const ANY: Self = Self(1 | 2 | 4);

	pub fn contains(self, other: Self) -> bool {
		self.0 & other.0 == other.0
	}

	pub fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Returns these flags with every member of `other` removed.
	pub fn without(self, other: Self) -> Self {
		Self(self.0 & !other.0)
	}

	/// Whitespace characters enabled by these flags, in a fixed order.
	pub(crate) fn characters(self) -> impl Iterator<Item = char> {
		[(Self::SPACE, ' '), (Self::TAB, '\t'), (Self::NEW_LINE, '\n')]
			.into_iter()
			.filter(move |(flag, _)| self.contains(*flag))
			.map(|(_, c)| c)
	}
}

impl BitOr for WhitespaceFlags {
	type Output = Self;

	fn bitor(self, rhs: Self) -> Self {
		Self(self.0 | rhs.0)
	}
}

/// What the whitespace/comment interleaver may emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum WhitespaceCommentFlags {
	WhitespaceOnly,
	CommentsOnly,
	#[default]
	WhitespaceAndComments,
}

impl WhitespaceCommentFlags {
	pub fn allows_whitespace(self) -> bool {
		matches!(self, Self::WhitespaceOnly | Self::WhitespaceAndComments)
	}

	pub fn allows_comments(self) -> bool {
		matches!(self, Self::CommentsOnly | Self::WhitespaceAndComments)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn line_comment_flags_drop_new_line() {
		let flags = WhitespaceFlags::ANY.without(WhitespaceFlags::NEW_LINE);
		assert_eq!(flags, WhitespaceFlags::SPACE | WhitespaceFlags::TAB);
		assert_eq!(flags.characters().collect::<Vec<_>>(), vec![' ', '\t']);
	}

	#[test]
	fn none_has_no_characters() {
		assert!(WhitespaceFlags::NONE.is_empty());
		assert_eq!(WhitespaceFlags::NONE.characters().count(), 0);
		assert!(WhitespaceFlags::ANY.contains(WhitespaceFlags::NEW_LINE));
	}
}
