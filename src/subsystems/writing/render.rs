use markdown::Options;

use super::ContentError;

/// Render a post body to HTML with GitHub-flavoured extensions.
///
/// Raw HTML in the source is escaped, not passed through.
pub fn to_html(source: &str) -> Result<String, ContentError> {
    let mut options = Options::gfm();
    options.compile.allow_dangerous_html = false;
    options.compile.allow_dangerous_protocol = false;
    markdown::to_html_with_options(source, &options)
        .map_err(|message| ContentError::Render(message.to_string()))
}
