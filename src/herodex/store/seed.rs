//! The catalogue a fresh mock store starts with: seven DC and eight Marvel heroes.

use chrono::NaiveDate;

use crate::model::{Hero, HeroId};

pub const DC_COMICS: &str = "DC Comics";
pub const MARVEL_COMICS: &str = "Marvel Comics";

struct SeedHero {
    name: &'static str,
    alter_ego: &'static str,
    powers: &'static [&'static str],
    publisher: &'static str,
    first_appearance: (i32, u32, u32),
    description: &'static str,
    image: &'static str,
}

const SEED: &[SeedHero] = &[
    SeedHero {
        name: "Superman",
        alter_ego: "Clark Kent",
        powers: &["Flight", "Super strength", "X-ray vision"],
        publisher: DC_COMICS,
        first_appearance: (1938, 4, 18),
        description: "The Man of Steel from Krypton",
        image: "superman",
    },
    SeedHero {
        name: "Spider-Man",
        alter_ego: "Peter Parker",
        powers: &["Wall-crawling", "Spider-sense", "Super strength"],
        publisher: MARVEL_COMICS,
        first_appearance: (1962, 8, 10),
        description: "Friendly neighborhood superhero",
        image: "spiderman",
    },
    SeedHero {
        name: "Wonder Woman",
        alter_ego: "Diana Prince",
        powers: &["Super strength", "Flight", "Combat skills"],
        publisher: DC_COMICS,
        first_appearance: (1941, 10, 21),
        description: "Amazon warrior princess",
        image: "wonderwoman",
    },
    SeedHero {
        name: "Batman",
        alter_ego: "Bruce Wayne",
        powers: &["Intelligence", "Martial arts"],
        publisher: DC_COMICS,
        first_appearance: (1939, 5, 1),
        description: "The Dark Knight of Gotham",
        image: "batman",
    },
    SeedHero {
        name: "Iron Man",
        alter_ego: "Tony Stark",
        powers: &["Powered armor", "Genius intellect"],
        publisher: MARVEL_COMICS,
        first_appearance: (1963, 3, 1),
        description: "Billionaire in a suit of armor",
        image: "ironman",
    },
    SeedHero {
        name: "Aquaman",
        alter_ego: "Arthur Curry",
        powers: &["Underwater breathing", "Marine telepathy"],
        publisher: DC_COMICS,
        first_appearance: (1941, 11, 1),
        description: "King of Atlantis",
        image: "aquaman",
    },
    SeedHero {
        name: "Thor",
        alter_ego: "Thor Odinson",
        powers: &["Weather control", "Flight", "Super strength"],
        publisher: MARVEL_COMICS,
        first_appearance: (1962, 8, 1),
        description: "God of Thunder",
        image: "thor",
    },
    SeedHero {
        name: "The Flash",
        alter_ego: "Barry Allen",
        powers: &["Super speed", "Time travel"],
        publisher: DC_COMICS,
        first_appearance: (1956, 10, 1),
        description: "The Fastest Man Alive",
        image: "flash",
    },
    SeedHero {
        name: "Hulk",
        alter_ego: "Bruce Banner",
        powers: &["Super strength", "Regeneration"],
        publisher: MARVEL_COMICS,
        first_appearance: (1962, 5, 1),
        description: "The strongest one there is",
        image: "hulk",
    },
    SeedHero {
        name: "Green Lantern",
        alter_ego: "Hal Jordan",
        powers: &["Power ring", "Flight"],
        publisher: DC_COMICS,
        first_appearance: (1959, 10, 1),
        description: "Protector of Sector 2814",
        image: "greenlantern",
    },
    SeedHero {
        name: "Captain America",
        alter_ego: "Steve Rogers",
        powers: &["Peak human strength", "Shield mastery"],
        publisher: MARVEL_COMICS,
        first_appearance: (1941, 3, 1),
        description: "The First Avenger",
        image: "captainamerica",
    },
    SeedHero {
        name: "Cyborg",
        alter_ego: "Victor Stone",
        powers: &["Technopathy", "Cybernetic body"],
        publisher: DC_COMICS,
        first_appearance: (1980, 10, 1),
        description: "Half man, half machine",
        image: "cyborg",
    },
    SeedHero {
        name: "Black Widow",
        alter_ego: "Natasha Romanoff",
        powers: &["Espionage", "Martial arts"],
        publisher: MARVEL_COMICS,
        first_appearance: (1964, 4, 1),
        description: "Former Red Room operative",
        image: "blackwidow",
    },
    SeedHero {
        name: "Black Panther",
        alter_ego: "T'Challa",
        powers: &["Enhanced senses", "Vibranium suit"],
        publisher: MARVEL_COMICS,
        first_appearance: (1966, 7, 1),
        description: "King of Wakanda",
        image: "blackpanther",
    },
    SeedHero {
        name: "Wolverine",
        alter_ego: "Logan",
        powers: &["Healing factor", "Adamantium claws"],
        publisher: MARVEL_COMICS,
        first_appearance: (1974, 10, 1),
        description: "The best there is at what he does",
        image: "wolverine",
    },
];

/// The seed heroes with ids `1..=15`, in canonical order.
pub fn catalogue() -> Vec<Hero> {
    SEED.iter()
        .zip(1..)
        .map(|(seed, id): (&SeedHero, HeroId)| {
            let (year, month, day) = seed.first_appearance;
            Hero {
                id,
                name: seed.name.to_string(),
                alter_ego: Some(seed.alter_ego.to_string()),
                powers: seed.powers.iter().map(|p| p.to_string()).collect(),
                publisher: Some(seed.publisher.to_string()),
                first_appearance: NaiveDate::from_ymd_opt(year, month, day),
                description: Some(seed.description.to_string()),
                image_url: Some(format!("assets/images/{}.jpg", seed.image)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_shape() {
        let heroes = catalogue();
        assert_eq!(heroes.len(), 15);
        let dc = heroes
            .iter()
            .filter(|h| h.publisher.as_deref() == Some(DC_COMICS))
            .count();
        assert_eq!(dc, 7);
        assert_eq!(heroes.len() - dc, 8);
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let ids: Vec<HeroId> = catalogue().iter().map(|h| h.id).collect();
        assert_eq!(ids, (1..=15).collect::<Vec<_>>());
    }

    #[test]
    fn test_every_date_is_valid() {
        assert!(catalogue().iter().all(|h| h.first_appearance.is_some()));
    }

    #[test]
    fn test_six_names_contain_man() {
        let matches = catalogue()
            .into_iter()
            .filter(|h| h.name.to_lowercase().contains("man"))
            .count();
        assert_eq!(matches, 6);
    }
}
