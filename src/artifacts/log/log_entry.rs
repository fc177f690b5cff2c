use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// One commit of the history with the refs pointing at it
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LogEntry {
    pub oid: ObjectId,
    pub commit: Commit,
    pub refs: Vec<String>,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.oid,
            self.commit.message(),
            self.commit.readable_timestamp()
        )?;

        if !self.refs.is_empty() {
            write!(f, " <- {}", self.refs.join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn refs_are_appended_after_an_arrow() {
        let commit = Commit::new(ObjectId::digest("tree"), vec![], 0, "Add a.txt".into());
        let oid = ObjectId::digest("c1");
        let entry = LogEntry::new(oid.clone(), commit.clone(), vec!["master".into(), "HEAD".into()]);

        assert_eq!(
            entry.to_string(),
            format!("{oid} [Add a.txt] Thu Jan 1 00:00:00 1970 +0000 <- master, HEAD")
        );
        assert_eq!(
            LogEntry::new(oid.clone(), commit, vec![]).to_string(),
            format!("{oid} [Add a.txt] Thu Jan 1 00:00:00 1970 +0000")
        );
    }
}
