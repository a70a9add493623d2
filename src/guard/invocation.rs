use std::ffi::OsStr;

/// Git commands that throw away uncommitted work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destructive {
    /// `git co -- <paths>`
    CheckoutPaths,
    /// `git co .`
    CheckoutAll,
    /// `git reset --hard`
    ResetHard,
}

/// What a `git push` is asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushShape {
    /// `--help` / `-h` anywhere on the command line.
    Help,
    /// `--delete` / `-d`, or `git push <remote> :<branch>`.
    DeleteBranch,
    /// Anything else.
    Update,
}

/// The shapes of git invocation the wrapper treats specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Destructive(Destructive),
    CherryPick,
    Push(PushShape),
    Passthrough,
}

impl Invocation {
    /// Classifies the arguments git would receive (without `git` itself).
    pub fn classify<S: AsRef<OsStr>>(args: &[S]) -> Self {
        let arg = |i: usize| args.get(i).and_then(|a| a.as_ref().to_str());

        match (arg(0), arg(1)) {
            (Some("co"), Some("--")) => Invocation::Destructive(Destructive::CheckoutPaths),
            (Some("co"), Some(".")) => Invocation::Destructive(Destructive::CheckoutAll),
            (Some("reset"), Some("--hard")) => Invocation::Destructive(Destructive::ResetHard),
            (Some("cherry-pick"), _) => Invocation::CherryPick,
            (Some("push"), _) => Invocation::Push(PushShape::of(args)),
            _ => Invocation::Passthrough,
        }
    }
}

impl PushShape {
    fn of<S: AsRef<OsStr>>(args: &[S]) -> Self {
        let has = |flags: &[&str]| {
            args.iter()
                .filter_map(|a| a.as_ref().to_str())
                .any(|a| flags.contains(&a))
        };

        if has(&["--help", "-h"]) {
            return PushShape::Help;
        }

        let colon_refspec = args
            .get(2)
            .and_then(|a| a.as_ref().to_str())
            .is_some_and(|a| a.starts_with(':'));

        if has(&["--delete", "-d"]) || colon_refspec {
            PushShape::DeleteBranch
        } else {
            PushShape::Update
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(args: &[&str]) -> Invocation {
        Invocation::classify(args)
    }

    #[test]
    fn destructive_shapes() {
        assert_eq!(
            classify(&["co", "--", "file.txt"]),
            Invocation::Destructive(Destructive::CheckoutPaths)
        );
        assert_eq!(
            classify(&["co", "."]),
            Invocation::Destructive(Destructive::CheckoutAll)
        );
        assert_eq!(
            classify(&["reset", "--hard", "HEAD~1"]),
            Invocation::Destructive(Destructive::ResetHard)
        );
    }

    #[test]
    fn only_leading_arguments_count() {
        assert_eq!(classify(&["co", "main", "--", "x"]), Invocation::Passthrough);
        assert_eq!(classify(&["reset", "--soft"]), Invocation::Passthrough);
        assert_eq!(classify(&["log", "reset", "--hard"]), Invocation::Passthrough);
        assert_eq!(classify(&["co"]), Invocation::Passthrough);
    }

    #[test]
    fn cherry_pick() {
        assert_eq!(classify(&["cherry-pick", "abc123"]), Invocation::CherryPick);
    }

    #[test]
    fn push_help_wins() {
        assert_eq!(
            classify(&["push", "--delete", "--help"]),
            Invocation::Push(PushShape::Help)
        );
        assert_eq!(classify(&["push", "-h"]), Invocation::Push(PushShape::Help));
    }

    #[test]
    fn push_delete_shapes() {
        assert_eq!(
            classify(&["push", "origin", ":feature-branch"]),
            Invocation::Push(PushShape::DeleteBranch)
        );
        assert_eq!(
            classify(&["push", "--delete", "origin", "feature"]),
            Invocation::Push(PushShape::DeleteBranch)
        );
        assert_eq!(
            classify(&["push", "origin", "-d", "feature"]),
            Invocation::Push(PushShape::DeleteBranch)
        );
    }

    #[test]
    fn ordinary_push() {
        assert_eq!(
            classify(&["push", "origin", "main"]),
            Invocation::Push(PushShape::Update)
        );
        assert_eq!(
            classify(&["push", ":not-third"]),
            Invocation::Push(PushShape::Update)
        );
    }

    #[test]
    fn empty_is_passthrough() {
        let none: [&str; 0] = [];
        assert_eq!(Invocation::classify(&none), Invocation::Passthrough);
    }
}
