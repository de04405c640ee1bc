//! Page-builder categories.
//!
//! Every resolver except [`CategoryResolvers::get_category_by_slug`]
//! requires a `pb.category` grant, then checks the content locale. The
//! grant's `rwd` letters and `own` flag are applied after both guards.
//!
//! | Resolver | Operation | Target |
//! |----------|-----------|--------|
//! | `getCategory` | read | one category |
//! | `listCategories` | read | all categories, owner-filtered |
//! | `getCategoryBySlug` | public | one category |
//! | `createCategory` | write | new category |
//! | `updateCategory` | write | one category |
//! | `deleteCategory` | delete | one category |

mod category;
mod resolvers;

pub use category::{Category, CategoryInput};
pub use resolvers::{
    CategoryResolvers, CATEGORY_ERROR, CATEGORY_EXISTS, CATEGORY_PERMISSION, VALIDATION_FAILED,
};
