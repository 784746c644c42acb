use std::collections::BTreeSet;

use slotmap::SlotMap;

use crate::entity::{Actor, Entity, EntityKind, Item};
use crate::error::{ActionFailure, GameError, GameResult};
use crate::types::{EntityId, Graphic, Pos, RenderOrder, Rgb, TileKind};

/// Graphic for cells the player has never seen.
pub const SHROUD: Graphic = Graphic { glyph: ' ', fg: Rgb(255, 255, 255), bg: Rgb(0, 0, 0) };

#[derive(Clone, Debug)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    tiles: Vec<TileKind>,
    visible: Vec<bool>,
    explored: Vec<bool>,
    /// Entities currently placed on this map. Items held in an inventory are not listed.
    entities: BTreeSet<EntityId>,
}

impl Map {
    /// Floor enclosed by a one-cell wall border. A zero dimension yields an empty map.
    pub fn new(width: usize, height: usize) -> Self {
        let mut map = Self::filled(width, height, TileKind::Floor);
        for (idx, tile) in map.tiles.iter_mut().enumerate() {
            let (x, y) = (idx % width, idx / width);
            if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                *tile = TileKind::Wall;
            }
        }
        map
    }

    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        let cells = width * height;
        Self {
            width,
            height,
            tiles: vec![tile; cells],
            visible: vec![false; cells],
            explored: vec![false; cells],
            entities: BTreeSet::new(),
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Out-of-bounds cells read as wall.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        self.index(pos).map_or(TileKind::Wall, |idx| self.tiles[idx])
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if let Some(idx) = self.index(pos) {
            self.tiles[idx] = tile;
        }
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.tile_at(pos).walkable()
    }

    pub fn is_transparent(&self, pos: Pos) -> bool {
        self.tile_at(pos).transparent()
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|idx| self.visible[idx])
    }

    pub fn is_explored(&self, pos: Pos) -> bool {
        self.index(pos).is_some_and(|idx| self.explored[idx])
    }

    pub fn set_visible(&mut self, pos: Pos, visible: bool) {
        if let Some(idx) = self.index(pos) {
            self.visible[idx] = visible;
        }
    }

    pub fn clear_visible(&mut self) {
        self.visible.fill(false);
    }

    /// Folds the current field of view into explored memory. Explored cells are never forgotten.
    pub fn remember_visible(&mut self) {
        for (explored, &visible) in self.explored.iter_mut().zip(&self.visible) {
            *explored |= visible;
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|&&visible| visible).count()
    }

    pub fn explored_count(&self) -> usize {
        self.explored.iter().filter(|&&explored| explored).count()
    }

    /// Lit graphic when visible, dark when only remembered, shroud otherwise.
    pub fn graphic_at(&self, pos: Pos) -> Graphic {
        let tile = self.tile_at(pos);
        if self.is_visible(pos) {
            tile.light()
        } else if self.is_explored(pos) {
            tile.dark()
        } else {
            SHROUD
        }
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter().copied()
    }

    pub fn contains_entity(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos).then(|| (pos.y as usize) * self.width + (pos.x as usize))
    }
}

/// Entity arena plus the single live map.
#[derive(Clone, Debug)]
pub struct World {
    pub map: Map,
    entities: SlotMap<EntityId, Entity>,
}

impl World {
    pub fn new(map: Map) -> Self {
        Self { map, entities: SlotMap::with_key() }
    }

    /// Places `entity` on the map at its own position.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = self.entities.insert(entity);
        self.map.entities.insert(id);
        id
    }

    /// Creates `item` directly inside `holder`'s inventory.
    pub fn spawn_into_inventory(&mut self, holder: EntityId, item: Entity) -> GameResult<EntityId> {
        if self.actor(holder)?.inventory.is_full() {
            return Err(ActionFailure::InventoryFull.into());
        }
        let is_item = item.as_item().is_some();
        let id = self.entities.insert(item);
        if !is_item {
            self.entities.remove(id);
            return Err(GameError::NotAnItem(id));
        }
        self.actor_mut(holder)?.inventory.push(id);
        Ok(id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn entity(&self, id: EntityId) -> GameResult<&Entity> {
        self.entities.get(id).ok_or(GameError::MissingEntity(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> GameResult<&mut Entity> {
        self.entities.get_mut(id).ok_or(GameError::MissingEntity(id))
    }

    pub fn actor(&self, id: EntityId) -> GameResult<&Actor> {
        self.entity(id)?.as_actor().ok_or(GameError::NotAnActor(id))
    }

    pub fn actor_mut(&mut self, id: EntityId) -> GameResult<&mut Actor> {
        self.entity_mut(id)?.as_actor_mut().ok_or(GameError::NotAnActor(id))
    }

    pub fn item(&self, id: EntityId) -> GameResult<&Item> {
        self.entity(id)?.as_item().ok_or(GameError::NotAnItem(id))
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities.get(id).is_some_and(Entity::is_alive)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities placed on the map, in id order.
    pub fn on_map(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.map.entity_ids().filter_map(|id| self.entities.get(id).map(|entity| (id, entity)))
    }

    pub fn living_actor_ids(&self) -> Vec<EntityId> {
        self.on_map().filter(|(_, entity)| entity.is_alive()).map(|(id, _)| id).collect()
    }

    pub fn actor_at(&self, pos: Pos) -> Option<EntityId> {
        self.on_map().find(|(_, entity)| entity.pos == pos && entity.is_alive()).map(|(id, _)| id)
    }

    pub fn blocking_entity_at(&self, pos: Pos) -> Option<EntityId> {
        self.on_map()
            .find(|(_, entity)| entity.pos == pos && entity.blocks_movement)
            .map(|(id, _)| id)
    }

    pub fn item_at(&self, pos: Pos) -> Option<EntityId> {
        self.on_map()
            .find(|(_, entity)| entity.pos == pos && entity.as_item().is_some())
            .map(|(id, _)| id)
    }

    pub fn entities_at(&self, pos: Pos) -> Vec<EntityId> {
        self.on_map().filter(|(_, entity)| entity.pos == pos).map(|(id, _)| id).collect()
    }

    /// Comma-separated names of everything at a visible cell; empty when the cell is unseen.
    pub fn names_at(&self, pos: Pos) -> String {
        if !self.map.is_visible(pos) {
            return String::new();
        }
        let names: Vec<&str> = self
            .entities_at(pos)
            .into_iter()
            .filter_map(|id| self.get(id).map(|entity| entity.name.as_str()))
            .collect();
        capitalize(&names.join(", "))
    }

    /// Visible entities ordered for drawing: corpses first, actors last.
    pub fn render_list(&self) -> Vec<(EntityId, &Entity)> {
        let mut visible: Vec<(EntityId, &Entity)> =
            self.on_map().filter(|(_, entity)| self.map.is_visible(entity.pos)).collect();
        visible.sort_by_key(|(id, entity)| (entity.render_order, *id));
        visible
    }

    /// Moves `item` from the map into `holder`'s inventory. Fails without side effects.
    pub fn take_into_inventory(&mut self, holder: EntityId, item: EntityId) -> GameResult<()> {
        self.item(item)?;
        if !self.map.contains_entity(item) {
            return Err(GameError::MissingEntity(item));
        }
        let inventory = &mut self.actor_mut(holder)?.inventory;
        if inventory.is_full() {
            return Err(ActionFailure::InventoryFull.into());
        }
        inventory.push(item);
        self.map.entities.remove(&item);
        Ok(())
    }

    /// Places a held item on the map at the holder's position and returns that position.
    pub fn drop_from_inventory(&mut self, holder: EntityId, item: EntityId) -> GameResult<Pos> {
        let pos = self.entity(holder)?.pos;
        if !self.actor_mut(holder)?.inventory.remove(item) {
            return Err(GameError::ItemNotHeld { holder, item });
        }
        let entity = self.entity_mut(item)?;
        entity.pos = pos;
        self.map.entities.insert(item);
        Ok(pos)
    }

    /// Removes a held item from the inventory and from the world.
    pub fn consume_from_inventory(&mut self, holder: EntityId, item: EntityId) -> GameResult<()> {
        if !self.actor(holder)?.inventory.contains(item) {
            return Err(GameError::ItemNotHeld { holder, item });
        }
        self.actor_mut(holder)?.inventory.remove(item);
        self.entities.remove(item);
        Ok(())
    }

    /// Every actor on the map that died and now lies as a corpse.
    pub fn corpse_ids(&self) -> Vec<EntityId> {
        self.on_map()
            .filter(|(_, entity)| {
                entity.render_order == RenderOrder::Corpse
                    && matches!(entity.kind, EntityKind::Actor(_))
            })
            .map(|(id, _)| id)
            .collect()
    }
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
