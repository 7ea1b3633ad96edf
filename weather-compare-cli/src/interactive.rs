//! Prompt loop standing in for the search box, its three buttons and the
//! clickable favorites list.

use std::fmt;

use inquire::{
    CustomUserError, InquireError, Select, Text,
    autocompletion::{Autocomplete, Replacement},
};

use crate::{cli::Session, render};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    Compare,
    Save,
    UseFavorite,
    RemoveFavorite,
    Quit,
}

impl Action {
    fn menu(has_favorites: bool) -> Vec<Action> {
        let mut items = vec![Action::Search, Action::Compare, Action::Save];
        if has_favorites {
            items.extend([Action::UseFavorite, Action::RemoveFavorite]);
        }
        items.push(Action::Quit);
        items
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Search => "Search",
            Action::Compare => "Compare",
            Action::Save => "Save as favorite",
            Action::UseFavorite => "Use a favorite",
            Action::RemoveFavorite => "Remove a favorite",
            Action::Quit => "Quit",
        })
    }
}

/// Offers saved favorites while typing a city name.
#[derive(Debug, Clone)]
struct FavoriteSuggester {
    favorites: Vec<String>,
}

impl FavoriteSuggester {
    fn new(favorites: &[String]) -> Self {
        Self { favorites: favorites.to_vec() }
    }

    /// Favorites containing `input`, ignoring case; all of them for empty input.
    fn matches(&self, input: &str) -> Vec<String> {
        let needle = input.trim().to_lowercase();
        self.favorites
            .iter()
            .filter(|f| f.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

impl Autocomplete for FavoriteSuggester {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, CustomUserError> {
        Ok(self.matches(input))
    }

    fn get_completion(
        &mut self,
        input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, CustomUserError> {
        if highlighted_suggestion.is_some() {
            return Ok(highlighted_suggestion);
        }
        let mut matches = self.matches(input);
        Ok(if matches.len() == 1 { matches.pop() } else { None })
    }
}

pub async fn run(mut session: Session) -> anyhow::Result<()> {
    println!("{}", render::favorites(session.favorites()));

    loop {
        let menu = Action::menu(!session.favorites().is_empty());
        let action = match Select::new("What next?", menu).prompt() {
            Ok(action) => action,
            Err(err) if is_cancel(&err) => break,
            Err(err) => return Err(err.into()),
        };

        match action {
            Action::Search | Action::Compare | Action::Save => {
                let prompt = Text::new("City:")
                    .with_default(session.input())
                    .with_autocomplete(FavoriteSuggester::new(session.favorites()));
                let city = match prompt.prompt() {
                    Ok(city) => city,
                    Err(err) if is_cancel(&err) => continue,
                    Err(err) => return Err(err.into()),
                };
                session.set_input(city);

                match action {
                    Action::Search => session.search_input().await,
                    Action::Compare => session.compare_input().await,
                    _ => {
                        session.save_input();
                        println!("{}", render::favorites(session.favorites()));
                        continue;
                    }
                }
                println!("{}", render::view(session.view()));
            }
            Action::UseFavorite | Action::RemoveFavorite => {
                let choices = session.favorites().to_vec();
                let city = match Select::new("Favorite:", choices).prompt() {
                    Ok(city) => city,
                    Err(err) if is_cancel(&err) => continue,
                    Err(err) => return Err(err.into()),
                };
                if action == Action::UseFavorite {
                    session.select_favorite(&city);
                } else {
                    session.remove_favorite(&city);
                    println!("{}", render::favorites(session.favorites()));
                }
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

fn is_cancel(err: &InquireError) -> bool {
    matches!(err, InquireError::OperationCanceled | InquireError::OperationInterrupted)
}
