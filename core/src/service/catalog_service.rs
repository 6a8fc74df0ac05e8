use crate::error::WorkError;
use crate::model::position::{next_position_id, validate_name, validate_price, Position};
use crate::repository::DocumentStore;
use crate::service::dto::Notice;
use crate::store::WorkStore;

impl<P: DocumentStore, B: DocumentStore> WorkStore<P, B> {
    pub fn positions(&self) -> &[Position] {
        &self.data.positions
    }

    pub fn add_position(&mut self, name: &str, unit_price: f64) -> Result<Position, WorkError> {
        let result = self.mutate(|data| {
            let position = Position::new(next_position_id(&data.positions), name, unit_price)?;
            data.positions.push(position.clone());
            Ok(position)
        });
        self.report(&result, "Position added");
        result
    }

    pub fn update_position(
        &mut self,
        id: u32,
        name: &str,
        unit_price: f64,
    ) -> Result<Position, WorkError> {
        let result = self.mutate(|data| {
            let name = validate_name(name)?;
            let unit_price = validate_price(unit_price)?;
            let position = data
                .positions
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(WorkError::PositionNotFound(id))?;
            position.name = name;
            position.unit_price = unit_price;
            Ok(position.clone())
        });
        self.report(&result, "Position updated");
        result
    }

    /// Removes the position from the catalog. Saved line entries keep their
    /// own copy of its name and price.
    pub fn delete_position(&mut self, id: u32) -> Option<Position> {
        let removed = self
            .mutate(|data| {
                let index = data.positions.iter().position(|p| p.id == id);
                Ok(index.map(|i| data.positions.remove(i)))
            })
            .unwrap_or(None);
        if removed.is_some() {
            self.notify(Notice::info("Position deleted"));
        }
        removed
    }
}
