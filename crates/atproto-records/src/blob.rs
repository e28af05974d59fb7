/// URL serving a blob straight from the PDS that hosts it.
///
/// Nothing is fetched here; the unfurl consumer loads the URL itself.
pub fn blob_url(pds: &str, did: &str, cid: &str) -> String {
    format!("{pds}/xrpc/com.atproto.sync.getBlob?did={did}&cid={cid}")
}
