use anyhow::{bail, Context, Result};
use std::path::Path;

use extlink_core::{
    full_url, full_url_raw, ExtlinkConfig, LinkParameter, LinkResource, RenderContext, UrlVariable,
};

/// Expands a link against a render-context file, with optional parameters
/// given as `querykey=variablename` pairs.
pub fn run_expand(
    cfg: &ExtlinkConfig,
    url: &str,
    context_path: &str,
    params: &[String],
    raw: bool,
) -> Result<()> {
    let ctx = RenderContext::from_toml_file(Path::new(context_path))?;

    let mut resource = LinkResource::new(0, "extlink expand", url);
    resource.set_parameters(&parse_params(params)?);

    let expanded = if raw {
        full_url_raw(&resource, &ctx, cfg)
    } else {
        full_url(&resource, &ctx, cfg)
    };
    println!("{expanded}");
    Ok(())
}

fn parse_params(params: &[String]) -> Result<Vec<LinkParameter>> {
    params
        .iter()
        .map(|pair| {
            let Some((name, variable)) = pair.split_once('=') else {
                bail!("parameter {pair:?} is not of the form KEY=VARIABLE");
            };
            let variable: UrlVariable = variable
                .parse()
                .with_context(|| format!("parameter {pair:?}"))?;
            Ok(LinkParameter {
                name: name.to_string(),
                variable,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_params() {
        let parsed = parse_params(&["cid=courseid".into(), "l=lang".into()]).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, "cid");
        assert_eq!(parsed[1].variable, UrlVariable::Lang);
    }

    #[test]
    fn rejects_malformed_and_unknown_params() {
        assert!(parse_params(&["nodelimiter".into()]).is_err());
        assert!(parse_params(&["k=notavariable".into()]).is_err());
    }
}
