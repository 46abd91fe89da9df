//! Composition of an itinerary into a document outline.
//!
//! [`compose`] walks the itinerary once and emits the sections in a fixed
//! order.  Each optional section is gated independently on the data it
//! renders, so a sparse itinerary simply yields a shorter document.

use genpdf::style::Color;

use crate::format::{
    format_amount, format_date, format_date_time, nights_label, payment_status,
    sorted_installments, title_case,
};
use crate::grouping::{group_activities, ActivityGroup};
use crate::itinerary::{
    Activity, DayPlan, Flight, Hotel, Itinerary, PaymentInstallment, Timestamp, Transfer,
};
use crate::model::{Block, Cell, ItineraryDocument, Section, SectionKind};
use crate::richtext::Span;

/// Heading of the document.
pub const DOCUMENT_HEADING: &str = "Itinerary Plan";
/// Line emitted instead of the day-by-day section when no days are planned.
pub const NO_DAYS_PLACEHOLDER: &str = "No days planned yet";
/// Line emitted for a day without activities.
pub const NO_ACTIVITIES_PLACEHOLDER: &str = "No activities planned for this day";

const INK: Color = Color::Rgb(34, 34, 34);
const HEADING_INK: Color = Color::Rgb(40, 40, 40);
const LABEL_INK: Color = Color::Rgb(70, 70, 70);
const BODY_INK: Color = Color::Rgb(90, 90, 90);
const MUTED_INK: Color = Color::Rgb(110, 110, 110);
const PLACEHOLDER_INK: Color = Color::Rgb(150, 150, 150);
const ACCENT: Color = Color::Rgb(41, 128, 185);
const TIME_ACCENT: Color = Color::Rgb(52, 152, 219);

// Indents relative to the left content margin, in millimetres.
const INDENT_GROUP: f64 = 3.0;
const INDENT_DETAIL: f64 = 5.0;
const INDENT_NESTED: f64 = 10.0;

const PAYMENT_COLUMNS: [usize; 4] = [30, 35, 35, 80];

/// Composes the full document outline for an itinerary.
///
/// The itinerary is only read; the returned outline owns copies of the text it
/// needs.
pub fn compose(itinerary: &Itinerary) -> ItineraryDocument {
    let title = itinerary.title.trim();
    let mut document = ItineraryDocument::new(if title.is_empty() {
        DOCUMENT_HEADING
    } else {
        title
    });

    document.push(header_section(itinerary));
    document.push(trip_information_section(itinerary));

    let optional = [
        hotels_section(&itinerary.hotels),
        flights_section(&itinerary.flights),
        transfers_section(&itinerary.transfers),
        overview_section(&itinerary.description),
        Some(day_by_day_section(&itinerary.days)),
        payment_plan_section(&itinerary.payment_plan),
        inclusions_exclusions_section(&itinerary.inclusions, &itinerary.exclusions),
    ];
    for section in optional.into_iter().flatten() {
        document.push(section);
    }

    log::debug!(
        "composed itinerary '{}' into {} sections",
        itinerary.id,
        document.sections().len()
    );
    document
}

fn header_section(itinerary: &Itinerary) -> Section {
    Section::untitled(SectionKind::Header)
        .with_block(Block::paragraph(vec![Span::new(DOCUMENT_HEADING)
            .bold()
            .sized(19)
            .colored(INK)]))
        .with_block(Block::paragraph(vec![Span::new(itinerary.title.as_str())
            .sized(12)
            .colored(BODY_INK)]))
        .with_block(Block::spacer(2.0))
        .with_block(Block::Divider)
        .with_block(Block::spacer(8.0))
}

fn trip_information_section(itinerary: &Itinerary) -> Section {
    let mut section = Section::new(SectionKind::TripInformation, "Trip Information");
    let start = format_date(itinerary.start_date.as_ref());
    let end = format_date(itinerary.end_date.as_ref());
    let duration = format!("{} Days", itinerary.days.len());

    let fields = [
        ("User ID", itinerary.user_id.as_str()),
        ("Location", itinerary.location.as_str()),
        ("Start Date", start.as_str()),
        ("End Date", end.as_str()),
        ("Duration", duration.as_str()),
    ];
    for (label, value) in fields {
        if value.is_empty() {
            continue;
        }
        section.push(label_value(0.0, 30, label, value));
        section.push(Block::spacer(1.0));
    }

    section.with_block(Block::spacer(6.0))
}

fn hotels_section(hotels: &[Hotel]) -> Option<Section> {
    if hotels.is_empty() {
        return None;
    }

    let mut section = Section::new(SectionKind::Hotels, "Hotel Accommodations");
    for (idx, hotel) in hotels.iter().enumerate() {
        section.push(item_heading(format!("Hotel {}: {}", idx + 1, hotel.name)));

        if !hotel.city.is_empty() {
            section.push(label_value(INDENT_DETAIL, 25, "Location", &hotel.city));
        }
        if let Some(check_in) = &hotel.check_in {
            section.push(label_value(
                INDENT_DETAIL,
                25,
                "Check-in",
                &format_date(Some(check_in)),
            ));
        }
        if let Some(check_out) = &hotel.check_out {
            section.push(label_value(
                INDENT_DETAIL,
                25,
                "Check-out",
                &format_date(Some(check_out)),
            ));
        }
        if hotel.nights > 0 {
            section.push(label_value(
                INDENT_DETAIL,
                25,
                "Duration",
                &nights_label(hotel.nights),
            ));
        }

        if idx + 1 < hotels.len() {
            section.push(Block::spacer(3.0));
        }
    }

    Some(section.with_block(Block::spacer(4.0)))
}

/// Heading for a flight: airline and number when both are known, whichever is
/// present otherwise, or just the ordinal.
pub fn flight_heading(ordinal: usize, flight: &Flight) -> String {
    match (flight.airline.is_empty(), flight.flight_number.is_empty()) {
        (false, false) => format!(
            "Flight {}: {} {}",
            ordinal, flight.airline, flight.flight_number
        ),
        (false, true) => format!("Flight {}: {}", ordinal, flight.airline),
        (true, false) => format!("Flight {}: {}", ordinal, flight.flight_number),
        (true, true) => format!("Flight {}", ordinal),
    }
}

fn flights_section(flights: &[Flight]) -> Option<Section> {
    if flights.is_empty() {
        return None;
    }

    let mut section = Section::new(SectionKind::Flights, "Flight Details");
    for (idx, flight) in flights.iter().enumerate() {
        section.push(item_heading(flight_heading(idx + 1, flight)));

        push_flight_leg(
            &mut section,
            "Departure",
            &flight.departure_city,
            &flight.departure_airport,
            flight.departure_time.as_ref(),
        );
        section.push(Block::spacer(1.0));
        push_flight_leg(
            &mut section,
            "Arrival",
            &flight.arrival_city,
            &flight.arrival_airport,
            flight.arrival_time.as_ref(),
        );

        if idx + 1 < flights.len() {
            section.push(Block::spacer(4.0));
        }
    }

    Some(section.with_block(Block::spacer(4.0)))
}

fn push_flight_leg(
    section: &mut Section,
    label: &str,
    city: &str,
    airport: &str,
    time: Option<&Timestamp>,
) {
    if city.is_empty() && airport.is_empty() && time.is_none() {
        return;
    }

    section.push(Block::indented(
        INDENT_DETAIL,
        vec![Span::new(label).bold().sized(10).colored(LABEL_INK)],
    ));
    if !city.is_empty() {
        section.push(label_value(INDENT_NESTED, 20, "City", city));
    }
    if !airport.is_empty() {
        section.push(label_value(INDENT_NESTED, 20, "Airport", airport));
    }
    if time.is_some() {
        section.push(label_value(
            INDENT_NESTED,
            20,
            "Time",
            &format_date_time(time),
        ));
    }
}

fn transfers_section(transfers: &[Transfer]) -> Option<Section> {
    if transfers.is_empty() {
        return None;
    }

    let mut section = Section::new(SectionKind::Transfers, "Transfers");
    for transfer in transfers {
        section.push(item_heading(format!(
            "{} Transfer",
            title_case(&transfer.mode)
        )));
        section.push(body_line(
            0.0,
            format!(
                "Pickup: {}   Drop-off: {}   Time: {}",
                transfer.pickup, transfer.dropoff, transfer.pickup_time
            ),
        ));
        if !transfer.notes.trim().is_empty() {
            section.push(body_line(0.0, format!("Notes: {}", transfer.notes)));
        }
        section.push(Block::spacer(2.0));
    }

    Some(section.with_block(Block::spacer(4.0)))
}

fn overview_section(description: &str) -> Option<Section> {
    if description.trim().is_empty() {
        return None;
    }

    Some(
        Section::new(SectionKind::Overview, "Overview")
            .with_block(Block::paragraph(vec![Span::new(description)
                .sized(11)
                .colored(Color::Rgb(50, 50, 50))]))
            .with_block(Block::spacer(8.0)),
    )
}

fn day_by_day_section(days: &[DayPlan]) -> Section {
    if days.is_empty() {
        return Section::untitled(SectionKind::DayByDay).with_block(Block::paragraph(vec![
            Span::new(NO_DAYS_PLACEHOLDER)
                .italic()
                .sized(11)
                .colored(Color::Rgb(100, 100, 100)),
        ]));
    }

    let mut section = Section::new(SectionKind::DayByDay, "Day-by-Day Itinerary");
    for day in days {
        push_day(&mut section, day);
    }
    section
}

fn push_day(section: &mut Section, day: &DayPlan) {
    section.push(Block::paragraph(vec![Span::new(format!(
        "Day {}: {}",
        day.day_number, day.title
    ))
    .bold()
    .sized(12)
    .colored(ACCENT)]));
    section.push(Block::paragraph(vec![Span::new(format!(
        "Date: {}",
        format_date(day.date.as_ref())
    ))
    .sized(10)
    .colored(MUTED_INK)]));
    section.push(Block::spacer(1.0));

    let groups = group_activities(&day.activities);
    if groups.is_empty() {
        section.push(Block::indented(
            INDENT_NESTED,
            vec![Span::new(NO_ACTIVITIES_PLACEHOLDER)
                .italic()
                .sized(10)
                .colored(PLACEHOLDER_INK)],
        ));
        section.push(Block::spacer(8.0));
    }
    for group in &groups {
        push_activity_group(section, group);
    }

    section.push(Block::spacer(3.0));
    section.push(Block::Divider);
    section.push(Block::spacer(8.0));
}

fn push_activity_group(section: &mut Section, group: &ActivityGroup<'_>) {
    section.push(Block::indented(
        INDENT_GROUP,
        vec![Span::new(format!("{} Session", group.label()))
            .bold()
            .sized(11)
            .colored(LABEL_INK)],
    ));
    section.push(Block::spacer(1.0));

    let activities = group.activities();
    for (idx, activity) in activities.iter().enumerate() {
        push_activity(section, activity);
        if idx + 1 < activities.len() {
            section.push(Block::spacer(2.0));
        }
    }

    section.push(Block::spacer(3.0));
}

fn push_activity(section: &mut Section, activity: &Activity) {
    section.push(Block::row(
        INDENT_DETAIL,
        vec![
            Cell::new(
                28,
                vec![Span::new(activity.time.as_str())
                    .bold()
                    .sized(10)
                    .colored(TIME_ACCENT)],
            ),
            Cell::new(
                147,
                vec![Span::new(activity.title.as_str())
                    .bold()
                    .sized(10)
                    .colored(HEADING_INK)],
            ),
        ],
    ));

    let details = [
        ("Description", &activity.description),
        ("Location", &activity.location),
        ("Duration", &activity.duration),
    ];
    for (label, value) in details {
        if value.trim().is_empty() {
            continue;
        }
        section.push(body_line(INDENT_NESTED, format!("{}: {}", label, value)));
    }
}

fn payment_plan_section(plan: &[PaymentInstallment]) -> Option<Section> {
    if plan.is_empty() {
        return None;
    }

    let mut section = Section::new(SectionKind::PaymentPlan, "Payment Plan");
    let header = ["Installment", "Amount", "Due Date", "Status"];
    section.push(Block::row(
        0.0,
        header
            .iter()
            .zip(PAYMENT_COLUMNS)
            .map(|(text, weight)| {
                Cell::new(
                    weight,
                    vec![Span::new(*text)
                        .bold()
                        .sized(10)
                        .colored(Color::Rgb(60, 60, 60))],
                )
            })
            .collect::<Vec<_>>(),
    ));

    for installment in sorted_installments(plan) {
        let values = [
            format!("#{}", installment.installment_number),
            format_amount(installment.amount, &installment.currency),
            format_date(installment.due_date.as_ref()),
            payment_status(installment).to_owned(),
        ];
        section.push(Block::row(
            0.0,
            values
                .into_iter()
                .zip(PAYMENT_COLUMNS)
                .map(|(text, weight)| {
                    Cell::new(weight, vec![Span::new(text).sized(10).colored(HEADING_INK)])
                })
                .collect::<Vec<_>>(),
        ));
    }

    Some(section.with_block(Block::spacer(6.0)))
}

fn inclusions_exclusions_section(inclusions: &[String], exclusions: &[String]) -> Option<Section> {
    if inclusions.is_empty() && exclusions.is_empty() {
        return None;
    }

    let mut section = Section::new(SectionKind::InclusionsExclusions, "Inclusions and Exclusions");
    for (label, items) in [("Inclusions", inclusions), ("Exclusions", exclusions)] {
        if items.is_empty() {
            continue;
        }
        section.push(Block::paragraph(vec![Span::new(label)
            .bold()
            .sized(11)
            .colored(LABEL_INK)]));
        section.push(Block::BulletList {
            indent_mm: INDENT_DETAIL,
            items: items.to_vec(),
        });
        section.push(Block::spacer(2.0));
    }

    Some(section.with_block(Block::spacer(4.0)))
}

fn item_heading(text: String) -> Block {
    Block::paragraph(vec![Span::new(text).bold().sized(11).colored(HEADING_INK)])
}

fn body_line(indent_mm: f64, text: String) -> Block {
    Block::indented(indent_mm, vec![Span::new(text).sized(10).colored(BODY_INK)])
}

fn label_value(indent_mm: f64, label_weight: usize, label: &str, value: &str) -> Block {
    Block::row(
        indent_mm,
        vec![
            Cell::new(
                label_weight,
                vec![Span::new(format!("{}:", label))
                    .bold()
                    .sized(10)
                    .colored(LABEL_INK)],
            ),
            Cell::new(
                180 - label_weight,
                vec![Span::new(value).sized(10).colored(BODY_INK)],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_heading_falls_back() {
        let both = Flight {
            airline: "Garuda".into(),
            flight_number: "GA 880".into(),
            ..Flight::default()
        };
        let airline_only = Flight {
            airline: "Garuda".into(),
            ..Flight::default()
        };
        let number_only = Flight {
            flight_number: "GA 880".into(),
            ..Flight::default()
        };
        assert_eq!(flight_heading(1, &both), "Flight 1: Garuda GA 880");
        assert_eq!(flight_heading(2, &airline_only), "Flight 2: Garuda");
        assert_eq!(flight_heading(3, &number_only), "Flight 3: GA 880");
        assert_eq!(flight_heading(4, &Flight::default()), "Flight 4");
    }

    #[test]
    fn minimal_itinerary_has_header_metadata_and_placeholder() {
        let document = compose(&Itinerary::default());
        assert_eq!(
            document.kinds(),
            vec![
                SectionKind::Header,
                SectionKind::TripInformation,
                SectionKind::DayByDay
            ]
        );
        assert_eq!(document.title(), DOCUMENT_HEADING);
    }

    #[test]
    fn trip_information_skips_empty_values() {
        let document = compose(&Itinerary {
            location: "Bali".into(),
            ..Itinerary::default()
        });
        let lines = document
            .section(SectionKind::TripInformation)
            .expect("trip information")
            .text_lines();
        assert_eq!(
            lines,
            vec![
                "Location: | Bali",
                "Start Date: | -",
                "End Date: | -",
                "Duration: | 0 Days"
            ]
        );
    }

    #[test]
    fn transfer_notes_require_non_blank_text() {
        let transfers = vec![
            Transfer {
                mode: "PRIVATE CAR".into(),
                pickup: "Airport".into(),
                dropoff: "Hotel".into(),
                pickup_time: "14:00".into(),
                notes: "   ".into(),
            },
            Transfer {
                mode: "ferry".into(),
                notes: "Bring passport".into(),
                ..Transfer::default()
            },
        ];
        let lines = transfers_section(&transfers)
            .expect("transfers")
            .text_lines();
        assert_eq!(
            lines,
            vec![
                "Private car Transfer",
                "Pickup: Airport   Drop-off: Hotel   Time: 14:00",
                "Ferry Transfer",
                "Pickup:    Drop-off:    Time: ",
                "Notes: Bring passport",
            ]
        );
    }

    #[test]
    fn flight_legs_are_gated_on_their_fields() {
        let flights = vec![Flight {
            airline: "KLM".into(),
            arrival_airport: "DPS".into(),
            ..Flight::default()
        }];
        let lines = flights_section(&flights).expect("flights").text_lines();
        assert_eq!(lines, vec!["Flight 1: KLM", "Arrival", "Airport: | DPS"]);
    }

    #[test]
    fn inclusions_without_exclusions() {
        let section = inclusions_exclusions_section(&["Breakfast".to_owned()], &[])
            .expect("section");
        assert_eq!(section.text_lines(), vec!["Inclusions", "- Breakfast"]);
        assert!(inclusions_exclusions_section(&[], &[]).is_none());
    }

    #[test]
    fn blank_description_skips_overview() {
        assert!(overview_section(" \n ").is_none());
        assert!(overview_section("Beaches").is_some());
    }

    #[test]
    fn day_without_activities_shows_placeholder() {
        let section = day_by_day_section(&[DayPlan {
            day_number: 1,
            title: "Arrival".into(),
            ..DayPlan::default()
        }]);
        assert_eq!(
            section.text_lines(),
            vec!["Day 1: Arrival", "Date: -", NO_ACTIVITIES_PLACEHOLDER]
        );
        assert_eq!(section.blocks().last(), Some(&Block::spacer(8.0)));
        assert!(section.blocks().contains(&Block::Divider));
    }
}
