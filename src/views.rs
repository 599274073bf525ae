//! HTML view glue. One function per view, fed with values that were escaped
//! on the way in, so stored text is embedded directly.

use crate::dto::categories::CategoryDraft;
use crate::dto::products::{CategoryOption, ProductDraft};
use crate::form::{Violation, escape_html};
use crate::models::{Category, Product};
use crate::services::product_service::IndexCounts;

pub fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<nav><a href=\"/catalog\">Home</a> | <a href=\"/catalog/products\">Products</a> | \
         <a href=\"/catalog/categories\">Categories</a></nav>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    )
}

pub fn error_page(status: u16, message: &str) -> String {
    layout("Error", &format!("<p>{status}: {}</p>", escape_html(message)))
}

fn violation_list(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return String::new();
    }
    let items: String = violations
        .iter()
        .map(|v| format!("<li>{}</li>", v.message))
        .collect();
    format!("<ul class=\"errors\">{items}</ul>")
}

pub fn index(counts: &IndexCounts) -> String {
    let body = format!(
        "<p>The inventory currently holds the following record counts:</p>\n\
         <ul><li>Products: {}</li><li>Categories: {}</li></ul>",
        counts.products, counts.categories
    );
    layout("Grocery Inventory App", &body)
}

pub fn category_list(categories: &[Category]) -> String {
    let items: String = categories
        .iter()
        .map(|c| format!("<li><a href=\"{}\">{}</a></li>", c.url(), c.name))
        .collect();
    layout("Category List", &format!("<ul>{items}</ul>"))
}

pub fn category_detail(category: &Category, products: &[Product]) -> String {
    let items: String = products
        .iter()
        .map(|p| format!("<li><a href=\"{}\">{}</a></li>", p.url(), p.name))
        .collect();
    let body = format!(
        "<h2>{}</h2>\n<p>{}</p>\n<h3>Products</h3>\n<ul>{items}</ul>\n\
         <p><a href=\"{}/update\">Update</a> | <a href=\"{}/delete\">Delete</a></p>",
        category.name,
        category.description,
        category.url(),
        category.url()
    );
    layout("Category Detail", &body)
}

pub fn category_form(title: &str, draft: &CategoryDraft, violations: &[Violation]) -> String {
    let action = match draft.id {
        Some(id) => format!("/catalog/category/{id}/update"),
        None => "/catalog/category/create".to_string(),
    };
    let body = format!(
        "{errors}<form method=\"post\" action=\"{action}\">\n\
         <label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label>\n\
         <label>Description <input type=\"text\" name=\"description\" value=\"{description}\"></label>\n\
         <button type=\"submit\">Submit</button>\n</form>",
        errors = violation_list(violations),
        name = draft.name,
        description = draft.description,
    );
    layout(title, &body)
}

pub fn category_delete(category: &Category, products: &[Product]) -> String {
    let body = if products.is_empty() {
        format!(
            "<p>Delete category <strong>{}</strong>?</p>\n\
             <form method=\"post\" action=\"{}/delete\"><button type=\"submit\">Delete</button></form>",
            category.name,
            category.url()
        )
    } else {
        let items: String = products
            .iter()
            .map(|p| format!("<li><a href=\"{}\">{}</a></li>", p.url(), p.name))
            .collect();
        format!(
            "<p>Category <strong>{}</strong> cannot be deleted while the following \
             products reference it. Delete or reassign them first.</p>\n<ul>{items}</ul>",
            category.name
        )
    };
    layout("Delete Category", &body)
}

pub fn product_list(products: &[Product]) -> String {
    let items: String = products
        .iter()
        .map(|p| format!("<li><a href=\"{}\">{}</a></li>", p.url(), p.name))
        .collect();
    layout("Product List", &format!("<ul>{items}</ul>"))
}

pub fn product_detail(product: &Product, categories: &[Category]) -> String {
    let refs: String = categories
        .iter()
        .map(|c| format!("<li><a href=\"{}\">{}</a></li>", c.url(), c.name))
        .collect();
    let body = format!(
        "<h2>{}</h2>\n<p>{}</p>\n<p>Price: ${:.2}</p>\n<p>In stock: {}</p>\n\
         <h3>Categories</h3>\n<ul>{refs}</ul>\n\
         <p><a href=\"{}/update\">Update</a> | <a href=\"{}/delete\">Delete</a></p>",
        product.name,
        product.description,
        product.price,
        product.number_in_stock,
        product.url(),
        product.url()
    );
    layout("Product Detail", &body)
}

pub fn product_form(
    title: &str,
    draft: &ProductDraft,
    options: &[CategoryOption],
    violations: &[Violation],
) -> String {
    let action = match draft.id {
        Some(id) => format!("/catalog/product/{id}/update"),
        None => "/catalog/product/create".to_string(),
    };
    let checkboxes: String = options
        .iter()
        .map(|option| {
            format!(
                "<label><input type=\"checkbox\" name=\"category\" value=\"{}\"{}> {}</label>\n",
                option.category.id,
                if option.checked { " checked" } else { "" },
                option.category.name
            )
        })
        .collect();
    let body = format!(
        "{errors}<form method=\"post\" action=\"{action}\">\n\
         <label>Name <input type=\"text\" name=\"name\" value=\"{name}\"></label>\n\
         <label>Description <input type=\"text\" name=\"description\" value=\"{description}\"></label>\n\
         <label>Price <input type=\"text\" name=\"price\" value=\"{price}\"></label>\n\
         <label>Number in stock <input type=\"text\" name=\"number_in_stock\" value=\"{stock}\"></label>\n\
         <fieldset><legend>Categories</legend>\n{checkboxes}</fieldset>\n\
         <button type=\"submit\">Submit</button>\n</form>",
        errors = violation_list(violations),
        name = draft.name,
        description = draft.description,
        price = draft.price,
        stock = draft.number_in_stock,
    );
    layout(title, &body)
}

pub fn product_delete(product: &Product) -> String {
    let body = format!(
        "<p>Delete product <strong>{}</strong>?</p>\n\
         <form method=\"post\" action=\"{}/delete\"><button type=\"submit\">Delete</button></form>",
        product.name,
        product.url()
    );
    layout("Delete Product", &body)
}
