pub mod authors;
pub mod books;

use libris_kernel::ModuleRegistry;

use authors::routes::SharedAuthorService;
use books::routes::SharedBookService;

/// Register the catalog modules with the registry.
///
/// Authors go first: the `Book` table references `Author`.
pub fn register_all(
    registry: &mut ModuleRegistry,
    authors: SharedAuthorService,
    books: SharedBookService,
) {
    registry.register(authors::create_module(authors));
    registry.register(books::create_module(books));
}
