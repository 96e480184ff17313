//! Descriptions of the photo effects shown on the effects information page.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectInfo {
    pub icon_name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

static CATALOG: [EffectInfo; 5] = [
    EffectInfo {
        icon_name: "color.icon",
        title: "Colour leaks",
        description: "Colour leaks add a gorgeous film colour overlay into your photo. \
            Currently Kontax Cam provides three different colours: red, green, and blue.",
    },
    EffectInfo {
        icon_name: "calendar.icon",
        title: "Datestamp",
        description: "Datestamp allows you to add a real film date stamp into your photo.",
    },
    EffectInfo {
        icon_name: "grain.icon",
        title: "Grain",
        description: "Grain makes your photo looks vintage and old school! \
            Although excessive use might render the photo too grainy. Use with care!",
    },
    EffectInfo {
        icon_name: "dust.icon",
        title: "Dust",
        description: "Dust allows you to overlay your photo with real film dust. \
            This effect best used with a film/vintage filter rather than modern one.",
    },
    EffectInfo {
        icon_name: "leaks.icon",
        title: "Light leaks",
        description: "Light leaks makes your photo pop with custom made film light leaks. \
            This effect best used with a film/vintage filter rather than modern one. \
            But then, you can always experiment!",
    },
];

/// All effects in display order.
pub fn catalog() -> &'static [EffectInfo] {
    &CATALOG
}

/// Case-insensitive lookup by title.
pub fn find(title: &str) -> Option<&'static EffectInfo> {
    CATALOG
        .iter()
        .find(|effect| effect.title.eq_ignore_ascii_case(title))
}
