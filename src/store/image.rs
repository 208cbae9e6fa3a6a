const CDN_BASE: &str = "https://cdn.sanity.io/images";

/// Turn an image asset reference into a CDN URL.
///
/// References look like `image-<hash>-<width>x<height>-<ext>`; anything else
/// yields `None`.
pub fn image_url(project_id: &str, dataset: &str, asset_ref: &str) -> Option<String> {
    let rest = asset_ref.strip_prefix("image-")?;
    let (body, ext) = rest.rsplit_once('-')?;
    let (hash, dims) = body.rsplit_once('-')?;
    let (width, height) = dims.split_once('x')?;

    let valid = !hash.is_empty()
        && !ext.is_empty()
        && width.parse::<u32>().is_ok()
        && height.parse::<u32>().is_ok();
    if !valid {
        return None;
    }

    Some(format!(
        "{}/{}/{}/{}-{}.{}",
        CDN_BASE, project_id, dataset, hash, dims, ext
    ))
}
