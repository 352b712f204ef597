use scraper::{Html, Selector};

use sonkal_model::AchievementSummary;

use crate::client::{self, FetchError};

// Icon filename fragments that identify each award on the profile page.
const GOLD_ICON: &str = "design/1_place.png";
const SILVER_ICON: &str = "design/2_place.png";
const BRONZE_ICON: &str = "design/3_place.png";
const MVP_ICON: &str = "design/pohar.png";

/// Count award icons on a profile page.
///
/// Achievements live inside `#div_hlavni`, in the wide column div, as
/// tables of class `t_space` whose placement cells each hold one award
/// icon. If either container is missing the page structure is not what we
/// expect and the whole extraction yields `None` — that is distinct from a
/// competitor with zero awards, whose containers exist but hold no icons.
pub fn parse_achievements(html: &str) -> Option<AchievementSummary> {
    let document = Html::parse_document(html);

    let main_sel = Selector::parse("div#div_hlavni").expect("valid selector");
    let column_sel = Selector::parse("div.col.d_sirsi_sloupec").expect("valid selector");
    let table_sel = Selector::parse("table.t_space").expect("valid selector");
    let row_sel = Selector::parse("tr").expect("valid selector");
    let cell_sel = Selector::parse("td.td_uspechy_umisteni").expect("valid selector");
    let img_sel = Selector::parse("img").expect("valid selector");

    let main_div = match document.select(&main_sel).next() {
        Some(div) => div,
        None => {
            tracing::warn!("Main content div not found on page");
            return None;
        }
    };

    let column = match main_div.select(&column_sel).next() {
        Some(div) => div,
        None => {
            tracing::warn!("Achievements column not found on page");
            return None;
        }
    };

    let (mut gold, mut silver, mut bronze, mut mvp) = (0, 0, 0, 0);

    for table in column.select(&table_sel) {
        for row in table.select(&row_sel) {
            for cell in row.select(&cell_sel) {
                let Some(img) = cell.select(&img_sel).next() else {
                    continue;
                };
                let Some(src) = img.value().attr("src") else {
                    continue;
                };
                if src.contains(GOLD_ICON) {
                    gold += 1;
                } else if src.contains(SILVER_ICON) {
                    silver += 1;
                } else if src.contains(BRONZE_ICON) {
                    bronze += 1;
                } else if src.contains(MVP_ICON) {
                    mvp += 1;
                }
                // Any other icon is not an award; ignore it
            }
        }
    }

    Some(AchievementSummary::tally(gold, silver, bronze, mvp))
}

/// Fetch a competitor's profile page and extract their achievement
/// summary. Fetch failure or unexpected page structure yields `None`.
pub async fn fetch_achievements(client: &reqwest::Client, id: u32) -> Option<AchievementSummary> {
    let url = client::profile_url(id);

    let html = match client::fetch_page(client, &url).await {
        Ok(html) => html,
        Err(FetchError::Status(status)) => {
            tracing::warn!(id, %status, "Could not retrieve achievements: HTTP error");
            return None;
        }
        Err(FetchError::Transport(e)) => {
            tracing::warn!(id, error = %e, "Could not retrieve achievements: no response");
            return None;
        }
    };

    parse_achievements(&html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn award_page(cells: &str) -> String {
        format!(
            r#"
            <html><body>
            <div id="div_hlavni">
                <div class="col d_sirsi_sloupec">
                    <table class="t_space">
                        <tr>{cells}</tr>
                    </table>
                </div>
            </div>
            </body></html>
            "#
        )
    }

    fn award_cell(icon: &str) -> String {
        format!(r#"<td class="td_uspechy_umisteni"><img src="/{icon}"></td>"#)
    }

    #[test]
    fn test_counts_and_total() {
        let cells = [
            award_cell("design/1_place.png"),
            award_cell("design/1_place.png"),
            award_cell("design/2_place.png"),
            award_cell("design/pohar.png"),
        ]
        .join("");
        let summary = parse_achievements(&award_page(&cells)).unwrap();

        assert_eq!(summary.gold, 2);
        assert_eq!(summary.silver, 1);
        assert_eq!(summary.bronze, 0);
        assert_eq!(summary.mvp, 1);
        // MVP trophies do not count as medals
        assert_eq!(summary.total_medals, 3);
    }

    #[test]
    fn test_missing_main_div_is_absence() {
        let html = r#"
        <html><body>
        <div class="col d_sirsi_sloupec">
            <table class="t_space"><tr><td class="td_uspechy_umisteni">
                <img src="/design/1_place.png">
            </td></tr></table>
        </div>
        </body></html>
        "#;
        // Not a zeroed summary: the page structure is unexpected
        assert!(parse_achievements(html).is_none());
    }

    #[test]
    fn test_missing_column_is_absence() {
        let html = r#"<html><body><div id="div_hlavni"><p>moved</p></div></body></html>"#;
        assert!(parse_achievements(html).is_none());
    }

    #[test]
    fn test_no_awards_is_zeroed_summary() {
        let summary = parse_achievements(&award_page("")).unwrap();
        assert_eq!(summary, AchievementSummary::default());
    }

    #[test]
    fn test_unknown_icons_ignored() {
        let cells = [
            award_cell("design/diplom.png"),
            award_cell("design/3_place.png"),
        ]
        .join("");
        let summary = parse_achievements(&award_page(&cells)).unwrap();

        assert_eq!(summary.bronze, 1);
        assert_eq!(summary.total_medals, 1);
        assert_eq!(summary.gold + summary.silver + summary.mvp, 0);
    }

    #[test]
    fn test_cell_without_image_ignored() {
        let cells = format!(
            r#"<td class="td_uspechy_umisteni">1.</td>{}"#,
            award_cell("design/2_place.png")
        );
        let summary = parse_achievements(&award_page(&cells)).unwrap();
        assert_eq!(summary.silver, 1);
        assert_eq!(summary.total_medals, 1);
    }

    #[test]
    fn test_cells_outside_placement_class_ignored() {
        let cells = format!(
            r#"<td><img src="/design/1_place.png"></td>{}"#,
            award_cell("design/1_place.png")
        );
        let summary = parse_achievements(&award_page(&cells)).unwrap();
        assert_eq!(summary.gold, 1);
    }
}
