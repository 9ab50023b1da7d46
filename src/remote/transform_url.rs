use crate::models::{RemoteHandle, TransformSpec};

/// Build the deferred-execution URL applying `spec`, in order, to `handles`:
/// `{cdn_base}/{api_key}/{op}/.../[h1,h2,...]`.
///
/// Pure string construction. Nothing runs remotely until the URL is
/// fetched; the fetch is what makes the service resolve the chain and
/// stream back the derived artifact.
pub fn build_transform_url(
    cdn_base: &str,
    api_key: &str,
    spec: &TransformSpec,
    handles: &[RemoteHandle],
) -> String {
    let mut url = String::from(cdn_base.trim_end_matches('/'));
    url.push('/');
    url.push_str(api_key);
    for op in spec.ops() {
        url.push('/');
        url.push_str(&op.url_segment());
    }
    let handle_list = handles
        .iter()
        .map(RemoteHandle::as_str)
        .collect::<Vec<_>>()
        .join(",");
    url.push_str("/[");
    url.push_str(&handle_list);
    url.push(']');
    url
}
