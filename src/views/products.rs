use log::info;
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::rc::Rc;
use stockdesk_shared::protocol::{
    DeleteProductRequest, IMPORT_FILE_FIELD, ListProductsRequest, PATH_EXPORT_CSV,
    PATH_IMPORT_CSV, UpdateProductRequest,
};
use stockdesk_shared::{Ack, CONTENT_TYPE_CSV, Product, ProductDraft, SaleRequest};

use crate::api::ApiClient;
use crate::csv_schema::{EXPORT_FILE_NAME, decode_products};
use crate::error::{ClientError, ValidationError};
use crate::notice::Notice;
use crate::request::{FilePart, HttpClient};
use crate::sync::{Applied, Outcome, Resource};

pub const FETCH_FAILED: &str = "Failed to fetch products. Please try again.";
pub const FORM_INCOMPLETE: &str = "Please fill in all fields before submitting.";
pub const PRODUCT_ADDED: &str = "Product added successfully";
pub const PRODUCT_UPDATED: &str = "Product updated successfully";
pub const SAVE_FAILED: &str = "Error adding product.";
pub const SELL_INVALID: &str = "Please select a product and enter a valid quantity.";
pub const PRODUCT_SOLD: &str = "Product sold successfully!";
pub const SELL_FAILED: &str = "Error selling product.";
pub const PRODUCT_DELETED: &str = "Product deleted successfully!";
pub const DELETE_FAILED: &str = "Error deleting product. Please try again.";
pub const IMPORT_NO_FILE: &str = "Please select a CSV file to import.";
pub const IMPORT_SUCCESS: &str = "CSV imported successfully!";
pub const IMPORT_FAILED: &str =
    "Error importing CSV. Please check the file format, and duplicates before Import.";
pub const EXPORT_SUCCESS: &str = "CSV exported successfully!";
pub const EXPORT_FAILED: &str = "Error exporting CSV. Please try again.";

// =========================================================
// Forms
// =========================================================

/// Add/edit form, holding raw input text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity_in_stock: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            quantity_in_stock: product.quantity_in_stock.to_string(),
        }
    }

    pub fn to_draft(&self) -> Result<ProductDraft, ValidationError> {
        let name = required(&self.name, "Name")?;
        let category = required(&self.category, "Category")?;

        let price = required(&self.price, "Price")?
            .parse::<Decimal>()
            .ok()
            .filter(|p| !p.is_sign_negative())
            .ok_or(ValidationError::InvalidNumber { field: "Price" })?;

        let quantity_in_stock = required(&self.quantity_in_stock, "Quantity")?
            .parse::<u32>()
            .map_err(|_| ValidationError::InvalidNumber { field: "Quantity" })?;

        Ok(ProductDraft {
            name: name.to_string(),
            category: category.to_string(),
            price,
            quantity_in_stock,
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellForm {
    pub product_id: String,
    pub quantity: String,
}

impl SellForm {
    pub fn to_request(&self) -> Result<SaleRequest, ValidationError> {
        let product_id = required(&self.product_id, "Product")?;
        let quantity = required(&self.quantity, "Quantity")?
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidNumber { field: "Quantity" })?;
        if quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity);
        }
        let quantity =
            u32::try_from(quantity).map_err(|_| ValidationError::InvalidNumber { field: "Quantity" })?;

        Ok(SaleRequest {
            product_id: product_id.to_string(),
            quantity,
        })
    }
}

/// A file picked for import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Export result, ready to hand to a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedCsv {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

// =========================================================
// Controller
// =========================================================

pub struct ProductsController<C> {
    api: Rc<ApiClient<C>>,
    products: Resource<Vec<Product>>,
    /// Id of the product the form is editing, if any.
    editing: RefCell<Option<String>>,
}

impl<C: HttpClient + 'static> ProductsController<C> {
    pub fn new(api: Rc<ApiClient<C>>) -> Self {
        let products =
            Resource::from_request(api.clone(), "products", FETCH_FAILED, ListProductsRequest);
        Self {
            api,
            products,
            editing: RefCell::new(None),
        }
    }

    /// Loads the list; returns a notice when the fetch failed.
    pub async fn mount(&self) -> Option<Notice> {
        let applied = self.products.mount().await;
        self.fetch_notice(applied)
    }

    pub async fn refresh(&self) -> Option<Notice> {
        let applied = self.products.refresh().await;
        self.fetch_notice(applied)
    }

    fn fetch_notice(&self, applied: Applied) -> Option<Notice> {
        match applied {
            Applied::Fresh => self.products.error().map(Notice::error),
            Applied::Stale | Applied::Unmounted => None,
        }
    }

    pub fn unmount(&self) {
        self.products.unmount();
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.data().unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.products.is_loading()
    }

    // ---------------------------------------------------------
    // Add / edit
    // ---------------------------------------------------------

    /// Switches the form to editing `product` and returns it pre-filled.
    pub fn begin_edit(&self, product: &Product) -> ProductForm {
        *self.editing.borrow_mut() = Some(product.id.clone());
        ProductForm::from_product(product)
    }

    pub fn cancel_edit(&self) {
        self.editing.borrow_mut().take();
    }

    pub fn editing(&self) -> Option<String> {
        self.editing.borrow().clone()
    }

    /// Creates a product, or updates the one being edited.
    pub async fn submit(&self, form: &ProductForm) -> Outcome<Product> {
        let draft = match form.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                info!("product form rejected: {}", e);
                return Outcome::failed(Notice::warning(FORM_INCOMPLETE));
            }
        };

        let editing = self.editing();
        let outcome = match editing {
            Some(id) => {
                let request = UpdateProductRequest { id, draft };
                self.products
                    .mutate(self.api.send(&request), PRODUCT_UPDATED, SAVE_FAILED)
                    .await
            }
            None => {
                self.products
                    .mutate(self.api.send(&draft), PRODUCT_ADDED, SAVE_FAILED)
                    .await
            }
        };

        if outcome.succeeded() {
            self.cancel_edit();
        }
        outcome
    }

    pub async fn delete(&self, id: &str) -> Outcome<Ack> {
        let request = DeleteProductRequest { id: id.to_string() };
        self.products
            .mutate(self.api.send(&request), PRODUCT_DELETED, DELETE_FAILED)
            .await
    }

    pub async fn sell(&self, form: &SellForm) -> Outcome<Ack> {
        let request = match form.to_request() {
            Ok(request) => request,
            Err(e) => {
                info!("sale rejected: {}", e);
                return Outcome::failed(Notice::warning(SELL_INVALID));
            }
        };

        self.products
            .mutate(self.api.send(&request), PRODUCT_SOLD, SELL_FAILED)
            .await
    }

    // ---------------------------------------------------------
    // CSV
    // ---------------------------------------------------------

    /// Validates the file locally, then uploads it as-is.
    pub async fn import(&self, file: Option<SelectedFile>) -> Outcome<Ack> {
        let Some(file) = file else {
            return Outcome::failed(Notice::warning(IMPORT_NO_FILE));
        };

        let rows = match decode_products(&file.bytes) {
            Ok(rows) => rows,
            Err(e) => {
                let err = ClientError::from(e);
                let notice = Notice::error(err.user_message(IMPORT_FAILED)).log("csv import");
                return Outcome::failed(notice);
            }
        };
        info!("uploading {} ({} rows)", file.name, rows.len());

        let part = FilePart {
            field: IMPORT_FILE_FIELD.to_string(),
            file_name: file.name,
            content_type: CONTENT_TYPE_CSV.to_string(),
            bytes: file.bytes,
        };
        self.products
            .mutate(self.api.upload(PATH_IMPORT_CSV, part), IMPORT_SUCCESS, IMPORT_FAILED)
            .await
    }

    pub async fn export(&self) -> Outcome<ExportedCsv> {
        let download = async {
            let bytes = self.api.download(PATH_EXPORT_CSV).await?;
            Ok::<_, ClientError>(ExportedCsv {
                file_name: EXPORT_FILE_NAME,
                bytes,
            })
        };
        self.products
            .mutate(download, EXPORT_SUCCESS, EXPORT_FAILED)
            .await
    }
}

#[cfg(test)]
mod tests;
