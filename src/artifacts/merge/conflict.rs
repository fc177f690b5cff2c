use crate::areas::refs::HEAD_REF_NAME;
use crate::artifacts::branch::branch_name::BranchName;

/// File body marking a whole-file conflict between both sides of a merge.
///
/// One trailing newline of each side is folded into the markers, so single
/// line contents give exactly five lines.
pub fn conflict_block(ours: &str, theirs: &str, branch: &BranchName) -> String {
    format!(
        "<<<<<<< {HEAD_REF_NAME}\n{}\n=======\n{}\n>>>>>>> {branch}\n",
        trim_one_newline(ours),
        trim_one_newline(theirs)
    )
}

fn trim_one_newline(content: &str) -> &str {
    content
        .strip_suffix("\r\n")
        .or_else(|| content.strip_suffix('\n'))
        .unwrap_or(content)
}
