//! Parsing-context stack driving error recovery across nested delimiters.
//!
//! Every `(`, `[` and `{` construct pushes a frame. When a construct meets a
//! closing delimiter that belongs to an enclosing frame, it raises a
//! [`ContextJump`] aimed at that frame and returns its partial node. Each
//! construct between the two checks [`ParsingContextStack::is_jumping`] and
//! unwinds in turn, until the target frame lands the jump and consumes the
//! delimiter as its own.

use crate::SyntaxKind;

/// Deepest nesting of expressions and nested elements the parser descends
/// into. Past it the nested tokens are skipped as invalid.
pub(crate) const MAX_NESTING_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParsingContext {
    ListExpression,
    GroupExpression,
    BlockExpression,
}

impl ParsingContext {
    pub(crate) const fn opener(self) -> SyntaxKind {
        match self {
            Self::ListExpression => SyntaxKind::T_LBRACKET,
            Self::GroupExpression => SyntaxKind::T_LPAREN,
            Self::BlockExpression => SyntaxKind::T_LBRACE,
        }
    }

    pub(crate) const fn closer(self) -> SyntaxKind {
        match self {
            Self::ListExpression => SyntaxKind::T_RBRACKET,
            Self::GroupExpression => SyntaxKind::T_RPAREN,
            Self::BlockExpression => SyntaxKind::T_RBRACE,
        }
    }
}

/// Pending unwind towards the frame at `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ContextJump {
    pub(crate) target: usize,
}

/// What a frame should do with a closing delimiter it did not expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StrayCloser {
    /// An enclosing frame owns it: jump there.
    Jump(ContextJump),
    /// No frame owns it: skip it as invalid.
    Unmatched,
}

#[derive(Debug, Default)]
pub(crate) struct ParsingContextStack {
    frames: Vec<ParsingContext>,
    jump: Option<ContextJump>,
    nesting: usize,
}

impl ParsingContextStack {
    /// Push a frame and return its index, used later to pop and land jumps.
    pub(crate) fn push(&mut self, context: ParsingContext) -> usize {
        self.frames.push(context);
        self.frames.len() - 1
    }

    /// Drop the frame at `index` and anything above it.
    pub(crate) fn pop(&mut self, index: usize) {
        self.frames.truncate(index);
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when newlines end statements here: at the top level
    /// and directly inside a block, but not inside `(...)` or `[...]`.
    pub(crate) fn line_sensitive(&self) -> bool {
        self.frames
            .last()
            .is_none_or(|f| *f == ParsingContext::BlockExpression)
    }

    /// Enter one more level of nesting. Returns `false` and stays at the
    /// current level once [`MAX_NESTING_DEPTH`] is reached.
    pub(crate) fn enter(&mut self) -> bool {
        if self.nesting >= MAX_NESTING_DEPTH {
            log::debug!("nesting limit of {MAX_NESTING_DEPTH} reached");
            return false;
        }
        self.nesting += 1;
        true
    }

    pub(crate) fn nesting(&self) -> usize {
        self.nesting
    }

    /// Return to a level previously read from [`Self::nesting`].
    pub(crate) fn leave_to(&mut self, level: usize) {
        self.nesting = level.min(self.nesting);
    }

    /// Index of the innermost frame closed by `kind`.
    pub(crate) fn owner_of(&self, kind: SyntaxKind) -> Option<usize> {
        self.frames.iter().rposition(|f| f.closer() == kind)
    }

    /// Returns `true` when `kind` closes any open frame.
    pub(crate) fn closes_any(&self, kind: SyntaxKind) -> bool {
        self.owner_of(kind).is_some()
    }

    /// Classify a closing delimiter met by the frame at `frame` that is not
    /// its own closer.
    pub(crate) fn stray_closer(&self, frame: usize, kind: SyntaxKind) -> StrayCloser {
        match self.owner_of(kind) {
            Some(target) if target < frame => StrayCloser::Jump(ContextJump { target }),
            _ => StrayCloser::Unmatched,
        }
    }

    pub(crate) fn raise(&mut self, jump: ContextJump) {
        log::trace!("context jump raised towards frame {}", jump.target);
        self.jump = Some(jump);
    }

    pub(crate) fn is_jumping(&self) -> bool {
        self.jump.is_some()
    }

    /// Land a pending jump aimed at `frame`. Returns `false` when the jump
    /// targets an outer frame, in which case `frame` must unwind.
    pub(crate) fn land(&mut self, frame: usize) -> bool {
        match self.jump {
            Some(jump) if jump.target == frame => {
                log::trace!("context jump landed at frame {frame}");
                self.jump = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stray_closer_targets_the_owning_frame() {
        let mut stack = ParsingContextStack::default();
        let list = stack.push(ParsingContext::ListExpression);
        let group = stack.push(ParsingContext::GroupExpression);
        assert_eq!(
            stack.stray_closer(group, SyntaxKind::T_RBRACKET),
            StrayCloser::Jump(ContextJump { target: list })
        );
        assert_eq!(
            stack.stray_closer(group, SyntaxKind::T_RBRACE),
            StrayCloser::Unmatched
        );
    }

    #[test]
    fn only_the_target_frame_lands_a_jump() {
        let mut stack = ParsingContextStack::default();
        let block = stack.push(ParsingContext::BlockExpression);
        let list = stack.push(ParsingContext::ListExpression);
        let group = stack.push(ParsingContext::GroupExpression);
        stack.raise(ContextJump { target: block });
        assert!(!stack.land(group));
        stack.pop(group);
        assert!(!stack.land(list));
        stack.pop(list);
        assert!(stack.land(block));
        assert!(!stack.is_jumping());
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn nesting_stops_at_the_limit() {
        let mut stack = ParsingContextStack::default();
        let start = stack.nesting();
        for _ in 0..MAX_NESTING_DEPTH {
            assert!(stack.enter());
        }
        assert!(!stack.enter());
        assert_eq!(stack.nesting(), MAX_NESTING_DEPTH);
        stack.leave_to(start);
        assert!(stack.enter());
    }

    #[test]
    fn lists_and_groups_ignore_newlines() {
        let mut stack = ParsingContextStack::default();
        assert!(stack.line_sensitive());
        let block = stack.push(ParsingContext::BlockExpression);
        assert!(stack.line_sensitive());
        let list = stack.push(ParsingContext::ListExpression);
        assert!(!stack.line_sensitive());
        stack.pop(list);
        stack.push(ParsingContext::GroupExpression);
        assert!(!stack.line_sensitive());
        stack.pop(block);
        assert!(stack.line_sensitive());
    }
}
