//! Request paths of the groupings REST API, relative to the base URL.
//!
//! Every caller-supplied value is percent-encoded as a single path
//! segment, so `?`, `#` and `%` cannot leak into the query or fragment.
//! Lists that travel in a path segment (owner identifiers, group paths)
//! are encoded item by item and joined with `,`.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::grouping::{GroupPath, GroupingPath};
use crate::job::JobHandle;

/// Header carrying the acting user's uid on every request.
pub const CURRENT_USER_HEADER: &str = "current_user";

pub const MEMBERS: &str = "/members";
pub const MEMBERS_ASYNC: &str = "/members/async";
pub const FEEDBACK: &str = "/email/send/feedback";
pub const STACK_TRACE: &str = "/email/send/stack-trace";

/// Characters escaped inside one path segment. `:` and `,` stay literal.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode one path segment.
pub fn segment(value: &str) -> String {
    utf8_percent_encode(value, SEGMENT).to_string()
}

fn join<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| segment(item.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Status endpoint of an asynchronous job.
pub fn job_status(handle: &JobHandle) -> String {
    format!("/jobs/{}", segment(&handle.to_string()))
}

pub fn grouping(path: &GroupingPath) -> String {
    format!("/groupings/{}", segment(path.as_str()))
}

pub fn member_count(path: &GroupingPath) -> String {
    format!("{}/count", grouping(path))
}

pub fn description(path: &GroupingPath) -> String {
    format!("{}/description", grouping(path))
}

pub fn sync_destination(path: &GroupingPath, sync_dest_id: &str, enabled: bool) -> String {
    format!(
        "{}/sync-destination/{}/{enabled}",
        grouping(path),
        segment(sync_dest_id)
    )
}

pub fn opt_attribute(path: &GroupingPath, attribute: &str, enabled: bool) -> String {
    format!(
        "{}/opt-attribute/{}/{enabled}",
        grouping(path),
        segment(attribute)
    )
}

pub fn include_members(path: &GroupingPath) -> String {
    format!("{}/include-members", grouping(path))
}

pub fn include_members_async(path: &GroupingPath) -> String {
    format!("{}/include-members/async", grouping(path))
}

pub fn exclude_members(path: &GroupingPath) -> String {
    format!("{}/exclude-members", grouping(path))
}

pub fn exclude_members_async(path: &GroupingPath) -> String {
    format!("{}/exclude-members/async", grouping(path))
}

/// Self-service opt-in: the acting user joins the include list.
pub fn opt_in_self(path: &GroupingPath, uid: &str) -> String {
    format!("{}/include-members/{}/self", grouping(path), segment(uid))
}

/// Self-service opt-out: the acting user joins the exclude list.
pub fn opt_out_self(path: &GroupingPath, uid: &str) -> String {
    format!("{}/exclude-members/{}/self", grouping(path), segment(uid))
}

pub fn reset_include(path: &GroupingPath) -> String {
    format!("{}/include", grouping(path))
}

pub fn reset_include_async(path: &GroupingPath) -> String {
    format!("{}/include/async", grouping(path))
}

pub fn reset_exclude(path: &GroupingPath) -> String {
    format!("{}/exclude", grouping(path))
}

pub fn reset_exclude_async(path: &GroupingPath) -> String {
    format!("{}/exclude/async", grouping(path))
}

pub fn owners<S: AsRef<str>>(path: &GroupingPath, identifiers: &[S]) -> String {
    format!("{}/owners/{}", grouping(path), join(identifiers))
}

pub fn is_basis(path: &GroupingPath) -> String {
    format!("{}/is-basis", grouping(path))
}

pub fn where_listed(path: &GroupingPath) -> String {
    format!("{}/where-listed", grouping(path))
}

pub fn admin(uid: &str) -> String {
    format!("/admins/{}", segment(uid))
}

/// Removal of one member from several groups at once.
pub fn remove_from_groups(group_paths: &[GroupPath], uid: &str) -> String {
    let paths: Vec<String> = group_paths.iter().map(ToString::to_string).collect();
    format!("/admins/{}/{}", join(&paths), segment(uid))
}
