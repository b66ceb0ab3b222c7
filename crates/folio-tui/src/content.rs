//! Static page copy.
//!
//! Each page is a list of [`Section`]s. Sections inside a page's reveal
//! group are shown one by one as the sequencer makes them visible; trailing
//! sections outside the group are always shown.
//!
//! Contact details are placeholders.

use folio_core::router::ViewId;

/// Block of page copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Heading line. Empty for headless sections.
    pub heading: &'static str,
    /// Body lines, rendered without wrapping.
    pub body: &'static [&'static str],
}

impl Section {
    /// Rows the section occupies, including its trailing blank line.
    pub fn height(&self) -> usize {
        usize::from(!self.heading.is_empty()) + self.body.len() + 1
    }
}

const fn section(heading: &'static str, body: &'static [&'static str]) -> Section {
    Section { heading, body }
}

/// Owner name shown in the hero and footer.
pub const OWNER: &str = "Alex Doe";

/// Brand shown in the navbar.
pub const BRAND: &str = "folio";

const HOME: &[Section] = &[
    section("HELLO THERE", &["Hi, I'm Alex Doe"]),
    section("<coder>", &[
        "I build fast, accessible interfaces,",
        "turn coffee into code and bugs into features.",
    ]),
    section("", &["[3] Get in touch      [2] About me"]),
];

const HOME_WORK: &[Section] = &[
    section("SOME OF MY LATEST WORK", &[
        "  My UI design book            Book",
        "    A guide to modern UI design principles",
        "  Weekend match tracker        Side project",
        "    Live scores and far too many markets",
        "  Creating a lean design system   Design system",
        "    Building an efficient system for rapid prototyping",
    ]),
    section("", &["(c) Alex Doe. Built with ratatui."]),
];

/// Rows of the hero portrait card, between its borders.
pub const PORTRAIT: &[&str] = &["", "        ( o_o )", "       portrait", ""];

/// Badge lines revealed while the card is hovered.
pub const BADGE: &[&str] = &["  \u{2713} Available for work", "    Open to new opportunities"];

const ABOUT: &[Section] = &[
    section("WHO AM I?", &[
        "Hi, I'm Alex.",
        "A developer who turns coffee into code, and bugs into solutions.",
    ]),
    section("Professional me", &[
        "A full-stack developer with a knack for beautiful, functional apps.",
        "Five years of turning complex problems into simple solutions.",
        "",
        "Personal me:",
        "  * Jamming to music the neighbours dislike",
        "  * Stacking snacks in perfect pyramids before eating them",
        "",
        "  \"I don't always test my code, but when I do, I do it in production.\"",
    ]),
    section("By the numbers", &[
        "  1000+  Cups of coffee",
        "  inf    Bad jokes",
        "  24/7   Debugging",
    ]),
];

/// Skill bars drawn under the last About section, as label and percent.
/// Levels over 100 fill the bar and brag instead of showing a number.
pub const SKILLS: &[(&str, u16)] = &[("React", 90), ("JavaScript", 85), ("CSS", 95), ("Dad jokes", 110)];

const CONTACT: &[Section] = &[
    section("Get in touch", &["Have a project in mind or just want to say hi?", "My inbox is always open."]),
    section("Contact information", &[
        "  Email     hello@example.com",
        "  Phone     +00 000 000 0000",
        "  Location  Somewhere on Earth",
        "",
        "  Follow: github  twitter  linkedin  dribbble",
    ]),
];

const LOCATION: &[Section] = &[
    section("Where to find me", &["Tracking me down is easier than fixing a CSS bug."]),
    section("Official HQ", &["Where the magic (and occasional chaos) happens", "  42 Example Street, Example City"]),
    section("Coding cafes", &["Fuelled by caffeine and questionable decisions", "  Any cafe with decent wifi"]),
    section("Emergency locations", &["When deadlines are near", "  Wherever there is a power outlet"]),
    section("Map", &[
        "  +-------------------------------+",
        "  |      .      *  you are here    |",
        "  |   ~~~~         .      .        |",
        "  +-------------------------------+",
    ]),
    section("Visit", &["Drop by for coffee. Or code. Or both.", "[3] Get directions"]),
];

/// Sections of `view` in render order.
///
/// For Home the portrait card follows these as the last staggered child, and
/// for Contact the form follows as the last staggered child.
pub fn sections(view: ViewId) -> &'static [Section] {
    match view {
        ViewId::Home => HOME,
        ViewId::About => ABOUT,
        ViewId::Contact => CONTACT,
        ViewId::Location => LOCATION,
    }
}

/// Always-visible sections after the reveal group.
pub fn trailing_sections(view: ViewId) -> &'static [Section] {
    match view {
        ViewId::Home => HOME_WORK,
        ViewId::About | ViewId::Contact | ViewId::Location => &[],
    }
}
