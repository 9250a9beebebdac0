//! Built-in catalog used on first launch.

use common::{CategoryId, Money, ProductId};
use domain::{Category, Product};

fn category(id: &str, name: &str, color: &str, icon: &str, image: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        color: Some(color.to_string()),
        icon: Some(icon.to_string()),
        image_url: Some(format!("./assets/categories/{image}")),
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    cents: i64,
    stock: u32,
    category_id: &str,
    image: &str,
    is_featured: bool,
    short_description: &str,
    description: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Money::from_cents(cents),
        stock,
        category_id: CategoryId::new(category_id),
        image_url: Some(format!("./assets/products/{image}")),
        is_featured,
        short_description: Some(short_description.to_string()),
        description: Some(description.to_string()),
    }
}

pub fn categories() -> Vec<Category> {
    vec![
        category("cat-books", "Livres", "#3eb0dc", "bi-book", "books.png"),
        category("cat-it", "Informatique", "#9b59ff", "bi-cpu", "it.png"),
        category("cat-access", "Accessoires", "#0d5519", "bi-stars", "accessoire.png"),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        product(
            "p-1",
            "Clean Code",
            2990,
            5,
            "cat-books",
            "book1.png",
            true,
            "Readable code, one function at a time.",
            "Naming, small functions and honest indentation: a classic for keeping bugs out.",
        ),
        product(
            "p-2",
            "Refactoring",
            3490,
            3,
            "cat-books",
            "book2.png",
            true,
            "Change the shape, keep the behavior.",
            "A catalog of small, safe steps for restructuring code without breaking it.",
        ),
        product(
            "p-3",
            "Design Patterns",
            3990,
            2,
            "cat-books",
            "book3.png",
            false,
            "Factories, observers and friends.",
            "The reference vocabulary for recurring object-oriented designs.",
        ),
        product(
            "p-4",
            "Clavier mécanique",
            8900,
            4,
            "cat-it",
            "it1.png",
            true,
            "Clicky switches for late nights.",
            "A mechanical keyboard with satisfying tactile feedback on every key.",
        ),
        product(
            "p-5",
            "Souris ergonomique",
            3900,
            2,
            "cat-it",
            "it2.png",
            false,
            "Long sessions, happy wrist.",
            "A vertical mouse shaped to keep the forearm in a neutral position.",
        ),
        product(
            "p-6",
            "Hub USB-C",
            2490,
            6,
            "cat-it",
            "it3.png",
            false,
            "One port becomes many.",
            "Turns a single USB-C port into HDMI, USB-A and card reader slots.",
        ),
        product(
            "p-7",
            "Mug “Debug”",
            1250,
            10,
            "cat-access",
            "access1.png",
            false,
            "Fuel for morning fixes.",
            "A large mug for the coffee behind every last-minute bug fix.",
        ),
        product(
            "p-8",
            "Sticker “Ship it”",
            300,
            0,
            "cat-access",
            "access2.png",
            false,
            "For after a good merge.",
            "A laptop sticker to celebrate a successful release.",
        ),
        product(
            "p-9",
            "Carnet de notes",
            990,
            7,
            "cat-access",
            "access3.png",
            false,
            "Ideas, sketches and forgotten TODOs.",
            "A dotted notebook for diagrams only its owner understands.",
        ),
    ]
}
