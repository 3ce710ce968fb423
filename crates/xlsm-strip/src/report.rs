use std::fmt;

/// What the rewriter did with one source ZIP entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberAction {
    /// Not written to the output (the VBA project).
    Dropped,
    /// Rewritten with new XML content.
    Patched,
    /// A patchable part that needed no change; its original bytes were written back.
    Unchanged,
    /// Raw-copied, compressed bytes and entry metadata included.
    Copied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberOutcome {
    pub name: String,
    pub action: MemberAction,
}

/// Summary of a single rewrite, in source central-directory order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripReport {
    pub members: Vec<MemberOutcome>,
    /// Size of the source archive in bytes.
    pub input_size: u64,
    /// Size of the finished output archive in bytes.
    pub output_size: u64,
}

impl StripReport {
    pub fn count(&self, action: MemberAction) -> usize {
        self.members.iter().filter(|m| m.action == action).count()
    }

    /// Names of the entries written to the output, in output order.
    pub fn written_members(&self) -> impl Iterator<Item = &str> + '_ {
        self.members
            .iter()
            .filter(|m| m.action != MemberAction::Dropped)
            .map(|m| m.name.as_str())
    }

    pub fn dropped_members(&self) -> impl Iterator<Item = &str> + '_ {
        self.members
            .iter()
            .filter(|m| m.action == MemberAction::Dropped)
            .map(|m| m.name.as_str())
    }

    /// True when the rewrite removed or changed anything.
    pub fn stripped_anything(&self) -> bool {
        self.members
            .iter()
            .any(|m| matches!(m.action, MemberAction::Dropped | MemberAction::Patched))
    }

    /// Percentage by which the output is smaller than the input (negative when it grew).
    pub fn reduction_percent(&self) -> Option<f64> {
        if self.input_size == 0 {
            return None;
        }
        let input = self.input_size as f64;
        Some((input - self.output_size as f64) / input * 100.0)
    }
}

impl fmt::Display for StripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dropped={} patched={} unchanged={} copied={} size={}->{}",
            self.count(MemberAction::Dropped),
            self.count(MemberAction::Patched),
            self.count(MemberAction::Unchanged),
            self.count(MemberAction::Copied),
            self.input_size,
            self.output_size,
        )?;
        if let Some(reduction) = self.reduction_percent() {
            write!(f, " ({reduction:.1}% smaller)")?;
        }
        Ok(())
    }
}
