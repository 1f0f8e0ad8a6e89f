use super::*;
use shared::domain::{GenreId, TotalGenreCount};

fn summary(genre: &str, sales_count: u64, last_sale_date: &str) -> GenreSalesSummary {
    GenreSalesSummary {
        genre: genre.to_string(),
        sales_count,
        last_sale_date: last_sale_date.to_string(),
        last_track_sold: format!("{genre} track"),
    }
}

fn format_date(raw: &str) -> String {
    DateFormatter::default().format(raw)
}

fn scenario() -> DashboardData {
    DashboardData {
        total_genres: TotalGenreCount {
            total_genre_sold: 12,
        },
        recent_sale: Some(RecentSale {
            genre: "Rock".to_string(),
            date_sold: "2023-11-01".to_string(),
        }),
        genre_summaries: vec![summary("Rock", 5, "2023-11-01 00:00:00")],
        unsold_genres: vec![UnsoldGenre {
            genre_id: GenreId(3),
            name: "Polka".to_string(),
        }],
    }
}

#[test]
fn formats_rfc3339_timestamp() {
    let formatted = format_date("2024-03-05T00:00:00Z");
    assert!(!formatted.is_empty());
    assert_eq!(formatted, "3/5/2024");
}

#[test]
fn unparsable_date_is_invalid_date_marker() {
    assert_eq!(format_date("not-a-date"), "Invalid Date");
    assert_eq!(format_date(""), "Invalid Date");
    assert_eq!(format_date("2023-13-45"), "Invalid Date");
}

#[test]
fn formats_backend_datetime_shapes() {
    assert_eq!(format_date("2013-12-22 00:00:00"), "12/22/2013");
    assert_eq!(format_date("2013-12-22T08:30:00.250"), "12/22/2013");
    assert_eq!(format_date("2023-11-01"), "11/1/2023");
}

#[test]
fn offset_timestamps_render_in_utc() {
    assert_eq!(format_date("2024-03-05T23:30:00-02:00"), "3/6/2024");
}

#[test]
fn minute_precision_timestamps_are_accepted() {
    assert_eq!(format_date("2023-11-01T08:30"), "11/1/2023");
    assert_eq!(format_date("2023-11-01 08:30"), "11/1/2023");
    assert_eq!(format_date("2023-11-01T08:30Z"), "11/1/2023");
}

#[test]
fn compact_offsets_are_accepted() {
    assert_eq!(format_date("2023-11-01T08:30:00+0000"), "11/1/2023");
    assert_eq!(format_date("2023-11-01T23:30:00.5-0200"), "11/2/2023");
}

#[test]
fn timezone_patterns_fall_back_instead_of_panicking() {
    assert!(!is_renderable_pattern("%d %z"));
    assert!(is_renderable_pattern(DEFAULT_DATE_FORMAT));
    assert_eq!(DateFormatter::new("%d %z").format("2023-11-01"), INVALID_DATE);
    assert_eq!(DateFormatter::new("%Z").format("2023-11-01T08:30Z"), INVALID_DATE);
}

#[test]
fn custom_pattern_is_applied() {
    let dates = DateFormatter::new("%d.%m.%Y");
    assert_eq!(dates.format("2023-11-01"), "01.11.2023");
    assert_eq!(dates.format("garbage"), INVALID_DATE);
}

#[test]
fn summary_rows_keep_backend_order_and_number_from_one() {
    let rows = vec![
        summary("Rock", 5, "2023-11-01"),
        summary("Alternative", 9, "2023-01-01"),
        summary("Blues", 1, "bogus"),
    ];

    let rendered = genre_summary_rows(&rows, &DateFormatter::default());

    let indices: Vec<_> = rendered.iter().map(|row| row[0].as_str()).collect();
    let genres: Vec<_> = rendered.iter().map(|row| row[1].as_str()).collect();
    assert_eq!(indices, vec!["1", "2", "3"]);
    assert_eq!(genres, vec!["Rock", "Alternative", "Blues"]);
    assert_eq!(rendered[2][3], "Invalid Date");
}

#[test]
fn unsold_rows_number_from_one() {
    let rows = vec![
        UnsoldGenre {
            genre_id: GenreId(25),
            name: "Opera".to_string(),
        },
        UnsoldGenre {
            genre_id: GenreId(3),
            name: "Polka".to_string(),
        },
    ];
    assert_eq!(
        unsold_genre_rows(&rows),
        vec![
            vec!["1".to_string(), "Opera".to_string()],
            vec!["2".to_string(), "Polka".to_string()],
        ]
    );
}

#[test]
fn table_columns_are_padded_to_widest_cell() {
    let table = render_table(
        &["#", "Music Genre"],
        &[vec!["1".to_string(), "Rock And Roll".to_string()]],
    );
    assert_eq!(
        table,
        "| # | Music Genre   |\n\
         |---|---------------|\n\
         | 1 | Rock And Roll |"
    );
}

#[test]
fn scenario_renders_summary_text_and_single_rows() {
    let text = render_dashboard(&scenario(), &DateFormatter::default());

    assert!(text.contains("Number of music genres sold: 12"));
    assert!(text.contains("Most recent Sale: Rock on 11/1/2023"));
    assert!(text.contains("| 1 | Rock        | 5               | 11/1/2023 | Rock track      |"));
    assert!(text.contains("| 1 | Polka       |"));
    assert!(!text.contains("| 2 |"));
}

#[test]
fn missing_recent_sale_renders_dash() {
    assert_eq!(recent_sale_text(None, &DateFormatter::default()), "—");
}

#[test]
fn non_ready_states_render_status_lines() {
    let dates = DateFormatter::default();
    assert_eq!(render_state(&DashboardViewState::Loading, &dates), "Loading...");
    assert_eq!(
        render_state(
            &DashboardViewState::Failed {
                reason: "login failed: 401 Unauthorized".to_string()
            },
            &dates
        ),
        "Error: login failed: 401 Unauthorized"
    );
}
