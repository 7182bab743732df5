use crate::assets::SpriteKind;
use crate::config::GameConfig;
use crate::engine::{Anchor, Entity, Layer, Sprite, Tag, Visual, World};

pub const PROMPT: &str = "Press [Space] to play";

/// Adds the background and the solid floor strip every scene starts with.
pub fn build(world: &mut World, config: &GameConfig) {
    world.add(
        Entity::new([config.screen_width, config.screen_height])
            .on_layer(Layer::Background)
            .with_visual(Visual::Sprite(Sprite::new(SpriteKind::Background))),
    );

    world.add(
        Entity::new([config.screen_width, config.floor_height()])
            .with_tag(Tag::Floor)
            .with_tag(Tag::Surface)
            .at([0.0, config.floor_top()])
            .on_layer(Layer::Foreground)
            .with_visual(Visual::Sprite(Sprite::new(SpriteKind::Floor)))
            .solid(),
    );
}

/// Translucent panel with a title and the start prompt, used by the menu and game-over scenes.
pub fn title_card(world: &mut World, config: &GameConfig, title: &str, title_size: f32) {
    let width = config.screen_width;
    world.add(
        Entity::new([width - 50.0, 120.0])
            .at([25.0, 25.0])
            .on_layer(Layer::Ui)
            .with_visual(Visual::Rect {
                color: [0.0, 0.0, 0.0, 0.2],
            }),
    );
    world.add(text(title, title_size, [width / 2.0, 60.0]));
    world.add(text(PROMPT, 16.0, [width / 2.0, config.screen_height / 2.0]));
}

fn text(content: &str, size: f32, centre: [f32; 2]) -> Entity {
    Entity::new([0.0, size])
        .at(centre)
        .anchored(Anchor::Center)
        .on_layer(Layer::Ui)
        .with_visual(Visual::Text {
            content: content.to_owned(),
            size,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_is_flush_to_the_bottom() {
        let config = GameConfig::default();
        let mut world = World::new();
        build(&mut world, &config);

        assert_eq!(world.len(), 2);
        let floor = world.with_tag(Tag::Floor).next().unwrap();
        assert!(floor.is(Tag::Surface));
        assert!(floor.solid);
        let rect = floor.rect();
        assert_eq!(rect.min, [0.0, 210.0]);
        assert_eq!(rect.max_x(), 320.0);
        assert_eq!(rect.max_y(), 240.0);
    }

    #[test]
    fn title_card_adds_panel_and_labels() {
        let config = GameConfig::default();
        let mut world = World::new();
        title_card(&mut world, &config, "Pixel Bird", 34.0);

        let texts: Vec<&str> = world
            .iter()
            .filter_map(|e| match &e.visual {
                Visual::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Pixel Bird", PROMPT]);
        assert!(world.iter().all(|e| !e.area));
    }
}
