use uuid::Uuid;

use crate::domain::movie::models::Director;
use crate::domain::movie::models::Genre;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;

/// Movies every fresh deployment starts with.
///
/// Ids are fixed so the in-memory backend and the Postgres seed migration
/// (`migrations/20240301000002_seed_movies.sql`) agree on them.
pub fn starter_catalog() -> Vec<Movie> {
    let lasseter = director(
        "John Lasseter",
        "American filmmaker and animator, director of the first Toy Story.",
        1957,
    );
    let docter = director(
        "Pete Docter",
        "American filmmaker and animator, chief creative officer of Pixar.",
        1968,
    );
    let bird = director(
        "Brad Bird",
        "American director, screenwriter and animator.",
        1957,
    );
    let stanton = director(
        "Andrew Stanton",
        "American filmmaker and voice actor at Pixar since 1990.",
        1965,
    );

    vec![
        movie(
            1,
            "Coco",
            "Aspiring musician Miguel enters the Land of the Dead to find his great-great-grandfather.",
            director(
                "Lee Unkrich",
                "American film director, film editor, screenwriter and animator.",
                1967,
            ),
            &["Anthony Gonzalez", "Gael Garcia Bernal", "Benjamin Bratt"],
            "coco.png",
            true,
        ),
        movie(
            2,
            "Luca",
            "Two sea monsters spend an unforgettable summer on the Italian Riviera.",
            director(
                "Enrico Casarosa",
                "Italian storyboard artist, animator and director.",
                1971,
            ),
            &["Jacob Tremblay", "Jack Dylan Grazer", "Emma Berman"],
            "luca.png",
            false,
        ),
        movie(
            3,
            "Soul",
            "A music teacher who has lost his passion for music is transported out of his body.",
            docter.clone(),
            &["Jamie Foxx", "Tina Fey", "Graham Norton"],
            "soul.png",
            true,
        ),
        movie(
            4,
            "Toy Story",
            "A cowboy doll feels threatened when a new spaceman action figure arrives.",
            lasseter.clone(),
            &["Tom Hanks", "Tim Allen", "Don Rickles"],
            "toy-story.png",
            true,
        ),
        movie(
            5,
            "Monsters Inc",
            "Monsters generate power by scaring children, until a little girl gets loose.",
            docter,
            &["John Goodman", "Billy Crystal", "Mary Gibbs"],
            "monsters-inc.png",
            false,
        ),
        movie(
            6,
            "The Incredibles",
            "A family of undercover superheroes is forced back into action.",
            bird.clone(),
            &["Craig T. Nelson", "Holly Hunter", "Samuel L. Jackson"],
            "the-incredibles.png",
            false,
        ),
        movie(
            7,
            "WALL-E",
            "A waste-collecting robot left alone on Earth falls in love.",
            stanton.clone(),
            &["Ben Burtt", "Elissa Knight", "Jeff Garlin"],
            "wall-e.png",
            false,
        ),
        movie(
            8,
            "Cars",
            "A hotshot race car is stranded in a forgotten town on Route 66.",
            lasseter,
            &["Owen Wilson", "Paul Newman", "Bonnie Hunt"],
            "cars.png",
            false,
        ),
        movie(
            9,
            "Finding Nemo",
            "An overprotective clownfish crosses the ocean to bring his son home.",
            stanton,
            &["Albert Brooks", "Ellen DeGeneres", "Alexander Gould"],
            "finding-nemo.png",
            false,
        ),
        movie(
            10,
            "Ratatouille",
            "A rat who dreams of becoming a chef teams up with a young kitchen worker in Paris.",
            bird,
            &["Patton Oswalt", "Lou Romano", "Ian Holm"],
            "ratatouille.png",
            false,
        ),
    ]
}

fn animation() -> Genre {
    Genre {
        name: "Animation".to_string(),
        description: "Films in which images are manipulated to appear as moving pictures."
            .to_string(),
    }
}

fn director(name: &str, bio: &str, birth_year: i32) -> Director {
    Director {
        name: name.to_string(),
        bio: bio.to_string(),
        birth_year: Some(birth_year),
        death_year: None,
    }
}

fn movie(
    seq: u128,
    title: &str,
    description: &str,
    director: Director,
    actors: &[&str],
    image_path: &str,
    featured: bool,
) -> Movie {
    Movie {
        id: MovieId(Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0000 + seq)),
        title: title.to_string(),
        description: description.to_string(),
        genre: animation(),
        director,
        actors: actors.iter().map(|a| a.to_string()).collect(),
        image_path: Some(image_path.to_string()),
        featured,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const SEED_MIGRATION: &str =
        include_str!("../../../../migrations/20240301000002_seed_movies.sql");

    #[test]
    fn test_starter_catalog_titles() {
        let titles: Vec<String> = starter_catalog().into_iter().map(|m| m.title).collect();

        assert_eq!(
            titles,
            vec![
                "Coco",
                "Luca",
                "Soul",
                "Toy Story",
                "Monsters Inc",
                "The Incredibles",
                "WALL-E",
                "Cars",
                "Finding Nemo",
                "Ratatouille",
            ]
        );
    }

    #[test]
    fn test_starter_catalog_ids_are_unique_and_stable() {
        let catalog = starter_catalog();
        let ids: HashSet<MovieId> = catalog.iter().map(|m| m.id).collect();

        assert_eq!(ids.len(), catalog.len());
        assert_eq!(
            catalog[0].id.to_string(),
            "00000000-0000-4000-8000-000000000001"
        );
        assert_eq!(catalog, starter_catalog());
    }

    #[test]
    fn test_seed_migration_matches_catalog() {
        for movie in starter_catalog() {
            let id = format!("'{}'", movie.id);
            let title = format!("'{}'", movie.title);
            assert!(SEED_MIGRATION.contains(&id), "missing id for {}", movie.title);
            assert!(SEED_MIGRATION.contains(&title), "missing {}", movie.title);
        }
    }
}
