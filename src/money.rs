/// Render a cent amount the way the games show it: `$D.CC` from one dollar
/// up, `N¢` below that.
pub fn format_cents(cents: u32) -> String
{
    if cents >= 100 {
        format!("${}.{:02}", cents / 100, cents % 100)
    } else {
        format!("{cents}¢")
    }
}
